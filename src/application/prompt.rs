// src/application/prompt.rs

/// Interactive side of a view: yes/no confirmations and blocking alerts.
pub trait Prompter {
    /// Ask the user to confirm a destructive action. `false` aborts it.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a message the user has to acknowledge.
    fn alert(&mut self, message: &str);
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn alert(&mut self, message: &str) {
        (**self).alert(message)
    }
}
