use std::error::Error;
use std::fmt;
use std::sync::Arc;

use super::emit::ErrorDescriptor;

type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// Runtime error value carrying an error descriptor's identity
///
/// Joining causes or replacing the message never changes `code`, `status` or
/// `reason`, so [`StatusError::is`] keeps matching after wrapping.
#[derive(Debug, Clone)]
pub struct StatusError {
    code: i32,
    status: u16,
    reason: String,
    message: String,
    causes: Vec<Cause>,
}

impl StatusError {
    pub fn new(code: i32, status: u16, reason: impl Into<String>, message: impl Into<String>) -> Self {
        StatusError {
            code,
            status,
            reason: reason.into(),
            message: message.into(),
            causes: Vec::new(),
        }
    }

    pub fn from_descriptor(descriptor: &ErrorDescriptor) -> Self {
        Self::new(
            descriptor.code,
            descriptor.status,
            &descriptor.reason,
            &descriptor.message,
        )
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn causes(&self) -> impl Iterator<Item = &(dyn Error + Send + Sync + 'static)> {
        self.causes.iter().map(|c| c.as_ref())
    }

    /// Copy of this error with `causes` appended
    pub fn join<I, E>(&self, causes: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Error + Send + Sync + 'static,
    {
        let mut joined = self.clone();
        joined
            .causes
            .extend(causes.into_iter().map(|c| Arc::new(c) as Cause));
        joined
    }

    /// Copy of this error with a new message and `causes` appended
    pub fn join_with_message<I, E>(&self, message: impl Into<String>, causes: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Error + Send + Sync + 'static,
    {
        let mut joined = self.join(causes);
        joined.message = message.into();
        joined
    }

    /// Identity check: same code and reason, whatever the message or causes
    pub fn is(&self, target: &StatusError) -> bool {
        self.code == target.code && self.reason == target.reason
    }

    /// Whether `err`, its source chain, or any joined cause is `target`
    pub fn matches(err: &(dyn Error + 'static), target: &StatusError) -> bool {
        let mut current = Some(err);
        while let Some(e) = current {
            if let Some(status) = e.downcast_ref::<StatusError>() {
                if status.is(target) {
                    return true;
                }
                if status
                    .causes
                    .iter()
                    .skip(1)
                    .any(|c| Self::matches(c.as_ref(), target))
                {
                    return true;
                }
            }
            current = e.source();
        }
        false
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error: code = {} status = {} reason = {} message = {}",
            self.code, self.status, self.reason, self.message
        )?;
        for cause in &self.causes {
            write!(f, "; {cause}")?;
        }
        Ok(())
    }
}

impl Error for StatusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.causes.first().map(|c| c.as_ref() as &(dyn Error + 'static))
    }
}
