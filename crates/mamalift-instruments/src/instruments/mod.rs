pub mod epds;
