//! Lead identity attached to a valuation report.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub name: String,
    pub email: String,
}

impl Session {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        }
    }

    /// Both name and email are required before a report is addressed to someone.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }

    /// Report heading suffix, e.g. `" for Jane Doe"`, or empty when anonymous.
    pub fn heading_suffix(&self) -> String {
        if self.name.is_empty() {
            String::new()
        } else {
            format!(" for {}", self.name)
        }
    }
}
