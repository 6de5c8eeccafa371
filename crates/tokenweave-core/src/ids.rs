// ABOUTME: Identifier generation for theme registry entries
// ABOUTME: Random in production, sequential in tests so documents compare structurally

/// Source of unique registry entry identifiers (32 lowercase hex digits)
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Fresh random identifiers on every call
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        format!("{:032x}", rand::random::<u128>())
    }
}

/// Deterministic identifiers counting up from 1
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    issued: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("{:032x}", self.issued)
    }
}
