//! Form-level checks shared by every draft type.

/// Collects every failed rule so a single error can list them all.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.0.push(format!("{field} is required"));
        }
        self
    }

    pub fn present<T>(&mut self, field: &str, value: &Option<T>) -> &mut Self {
        if value.is_none() {
            self.0.push(format!("{field} is required"));
        }
        self
    }

    pub fn min_chars(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        let len = value.trim().chars().count();
        if len > 0 && len < min {
            self.0.push(format!("{field} must have at least {min} characters"));
        }
        self
    }

    /// Empty values pass; pair with [`Violations::required`] when the field is mandatory.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        let value = value.trim();
        if !value.is_empty() && !is_email(value) {
            self.0.push(format!("{field} is not a valid e-mail address"));
        }
        self
    }

    pub fn check(&mut self, ok: bool, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.0.push(message.into());
        }
        self
    }

    pub fn into_result(&mut self) -> Result<(), String> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.0).join("; "))
        }
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Case-insensitive containment; `term` is expected lower-cased.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}
