use crate::scoring::{AnswerOption, Question};
use crate::Instrument;

/// EPDS: Edinburgh Postnatal Depression Scale.
/// 10 items about the past 7 days, each scored 0–3. Total 0–30.
/// Items 3 and 5–10 are reverse-keyed (first option scores highest).
/// Item 10 asks about self-harm and is the critical item.
pub struct Epds;

pub const EPDS_ID: &str = "epds";
pub const CRITICAL_QUESTION_ID: u8 = 10;

impl Instrument for Epds {
    fn id(&self) -> &str {
        EPDS_ID
    }

    fn name(&self) -> &str {
        "EPDS"
    }

    fn questions(&self) -> &[Question] {
        static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
            vec![
                question(
                    1,
                    "In the past 7 days, I have been able to laugh and see the funny side of things:",
                    "This helps us understand how you've been experiencing joy and lightness recently.",
                    [
                        ("As much as I always could", 0),
                        ("Not quite so much now", 1),
                        ("Definitely not so much now", 2),
                        ("Not at all", 3),
                    ],
                ),
                question(
                    2,
                    "In the past 7 days, I have looked forward with enjoyment to things:",
                    "This helps us understand your sense of anticipation and hope for future activities.",
                    [
                        ("As much as I ever did", 0),
                        ("Rather less than I used to", 1),
                        ("Definitely less than I used to", 2),
                        ("Hardly at all", 3),
                    ],
                ),
                question(
                    3,
                    "In the past 7 days, I have blamed myself unnecessarily when things went wrong:",
                    "This helps us understand how you've been processing difficult situations.",
                    [
                        ("Yes, most of the time", 3),
                        ("Yes, some of the time", 2),
                        ("Not very often", 1),
                        ("No, never", 0),
                    ],
                ),
                question(
                    4,
                    "In the past 7 days, I have been anxious or worried for no good reason:",
                    "This helps us understand your overall anxiety levels and worry patterns.",
                    [
                        ("No, not at all", 0),
                        ("Hardly ever", 1),
                        ("Yes, sometimes", 2),
                        ("Yes, very often", 3),
                    ],
                ),
                question(
                    5,
                    "In the past 7 days, I have felt scared or panicky for no very good reason:",
                    "This helps us understand your experience with panic and fear responses.",
                    [
                        ("Yes, quite a lot", 3),
                        ("Yes, sometimes", 2),
                        ("No, not much", 1),
                        ("No, not at all", 0),
                    ],
                ),
                question(
                    6,
                    "In the past 7 days, things have been getting on top of me:",
                    "This helps us understand how manageable daily life has felt for you.",
                    [
                        ("Yes, most of the time I haven't been able to cope at all", 3),
                        ("Yes, sometimes I haven't been coping as well as usual", 2),
                        ("No, most of the time I have coped quite well", 1),
                        ("No, I have been coping as well as ever", 0),
                    ],
                ),
                question(
                    7,
                    "In the past 7 days, I have been so unhappy that I have had difficulty sleeping:",
                    "This helps us understand how your emotional state has affected your rest.",
                    [
                        ("Yes, most of the time", 3),
                        ("Yes, sometimes", 2),
                        ("Not very often", 1),
                        ("No, not at all", 0),
                    ],
                ),
                question(
                    8,
                    "In the past 7 days, I have felt sad or miserable:",
                    "This helps us understand your overall mood and emotional wellbeing.",
                    [
                        ("Yes, most of the time", 3),
                        ("Yes, quite often", 2),
                        ("Not very often", 1),
                        ("No, not at all", 0),
                    ],
                ),
                question(
                    9,
                    "In the past 7 days, I have been so unhappy that I have been crying:",
                    "This helps us understand the intensity of your emotional experiences.",
                    [
                        ("Yes, most of the time", 3),
                        ("Yes, quite often", 2),
                        ("Only occasionally", 1),
                        ("No, never", 0),
                    ],
                ),
                Question {
                    is_critical: true,
                    ..question(
                        CRITICAL_QUESTION_ID,
                        "In the past 7 days, the thought of harming myself has occurred to me:",
                        "This is a critical safety question that helps us ensure you receive appropriate care immediately.",
                        [
                            ("Yes, quite often", 3),
                            ("Sometimes", 2),
                            ("Hardly ever", 1),
                            ("Never", 0),
                        ],
                    )
                },
            ]
        });
        &QUESTIONS
    }
}

fn question(id: u8, prompt: &str, context: &str, options: [(&str, u8); 4]) -> Question {
    Question {
        id,
        prompt: prompt.to_string(),
        context: Some(context.to_string()),
        options: options
            .iter()
            .map(|(text, score)| AnswerOption {
                text: text.to_string(),
                score: *score,
            })
            .collect(),
        is_critical: false,
    }
}
