// src/application/sequence.rs

/// Marks one list load. Only the most recently issued ticket may apply its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_two_tickets_when_checking_then_only_latest_is_current() {
        // Arrange
        let mut sequence = RequestSequence::new();

        // Act
        let first = sequence.issue();
        let second = sequence.issue();

        // Assert
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
        assert!(first < second);
    }
}
