/// A rendered notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub html_body: String,
    pub recipients: Recipients,
}

/// Ordered recipient set. Addresses are trimmed and compared case-insensitively;
/// the first spelling seen is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipients {
    addresses: Vec<String>,
}

impl Recipients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an address, returning false when it is blank or already present.
    pub fn insert(&mut self, address: &str) -> bool {
        let address = address.trim();
        if address.is_empty() || self.contains(address) {
            return false;
        }
        self.addresses.push(address.to_string());
        true
    }

    /// Add every entry of a comma-separated list.
    pub fn extend_from_list(&mut self, list: &str) {
        for address in list.split(',') {
            self.insert(address);
        }
    }

    pub fn contains(&self, address: &str) -> bool {
        let address = address.trim();
        self.addresses
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(address))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn primary(&self) -> Option<&str> {
        self.addresses.first().map(String::as_str)
    }

    /// Just the first recipient, used for test runs.
    pub fn only_primary(&self) -> Self {
        Self {
            addresses: self.addresses.iter().take(1).cloned().collect(),
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Recipients {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut recipients = Recipients::new();
        for address in iter {
            recipients.insert(address.as_ref());
        }
        recipients
    }
}
