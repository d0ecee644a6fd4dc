//! Crate-specific error and result types, plus common conversions.

use ::std::{
    fmt::{self, Display},
    io,
};

/// Result type returned by functions that resolve windows or call into the
/// platform.
pub type Result<T> = ::std::result::Result<T, Error>;

/// The category of failure behind an [`Error`].
#[derive(Clone, Debug, PartialEq, Eq, ::thiserror::Error)]
pub enum ErrorKind {
    /// No window could be resolved for the requested target and the caller
    /// did not opt into a foreground-window fallback.
    #[error("no window found for target {target}")]
    TargetNotFound {
        /// Human readable description of the target which failed to resolve.
        target: String,
    },

    /// An operating system call failed. Captures the raw OS error code and
    /// the system message gathered at the point of failure.
    #[error("OS error {code:#010x}: {message}")]
    Os { code: i32, message: String },

    /// A value could not be packed into (or unpacked from) its wire form,
    /// e.g. keystroke flags into a message `lParam`.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The requested delivery mechanism cannot carry this kind of input, e.g.
    /// mouse input as window messages.
    #[error("{input} input cannot be delivered via {delivery}")]
    UnsupportedDelivery {
        input: &'static str,
        delivery: String,
    },
}

/// Error type for all fallible operations in this crate. The error attempts to
/// pro-actively capture as much context as possible (error codes, system error
/// message strings, the failing function).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    /// The underlying failure.
    kind: ErrorKind,

    /// The name of the platform API function which failed.
    function: Option<&'static str>,

    /// An optional context information which describes what was happening
    /// at the time error.
    context: Option<String>,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            kind,
            function,
            context,
        } = &self;

        if let Some(context) = context {
            write!(f, "{context}\nCaused by:\n    {kind}")?;
        } else {
            write!(f, "{kind}")?;
        }

        if let Some(function) = function {
            write!(f, " ({function})")?;
        }

        Ok(())
    }
}

impl ::std::error::Error for Error {}

impl Error {
    /// Constructs a new error of the given kind without further context.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            function: None,
            context: None,
        }
    }

    /// Constructs a [`ErrorKind::TargetNotFound`] error.
    pub fn target_not_found(target: impl Into<String>) -> Self {
        Self::new(ErrorKind::TargetNotFound {
            target: target.into(),
        })
    }

    /// The category of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns `true` if the error is a window/process resolution failure.
    pub fn is_target_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::TargetNotFound { .. })
    }

    /// The name of the platform function which failed, if recorded.
    pub fn function(&self) -> Option<&'static str> {
        self.function
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::new(ErrorKind::Os {
            code: err.raw_os_error().unwrap_or_default(),
            message: err.to_string(),
        })
    }
}

impl From<::deku::DekuError> for Error {
    fn from(err: ::deku::DekuError) -> Self {
        Self::new(ErrorKind::Encoding(err.to_string()))
    }
}

#[cfg(windows)]
impl From<::windows::core::Error> for Error {
    fn from(err: ::windows::core::Error) -> Self {
        Self::new(ErrorKind::Os {
            code: err.code().0,
            message: err.message().to_string_lossy(),
        })
    }
}

/// Gets the last OS error of the calling thread.
///
/// Returns `Ok` if there is no last error (e.g. if the error code is
/// `ERROR_SUCCESS`). Otherwise, returns `Err` with an inner error that contains
/// the system error message and code.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn get_last_err() -> Result<()> {
    let last_err = io::Error::last_os_error();

    match last_err.raw_os_error() {
        None | Some(0) => Ok(()),
        Some(_) => Err(last_err.into()),
    }
}

/// A crate-private trait which allows context information to be attached to
/// fallible types.
///
/// This is useful to attach high level context information and track which
/// particular platform function failed, something that might not be obvious
/// when relying on the inner OS error alone.
pub(crate) trait Context<T> {
    /// Attach the name of the function which failed to the error as additional
    /// context.
    fn function(self, function: &'static str) -> Result<T>
    where
        Self: Sized;

    /// Attach a context message to a fallible type and return crate error.
    fn context(self, ctx: impl AsRef<str>) -> Result<T>
    where
        Self: Sized;
}

impl<T> Context<T> for Result<T> {
    fn function(mut self, f: &'static str) -> Result<T>
    where
        Self: Sized,
    {
        if let Err(err) = &mut self {
            err.function = Some(f);
        }
        self
    }

    fn context(mut self, ctx: impl AsRef<str>) -> Result<T>
    where
        Self: Sized,
    {
        if let Err(err) = &mut self {
            err.context = Some(ctx.as_ref().to_owned());
        }
        self
    }
}

#[cfg(windows)]
impl<T> Context<T> for ::std::result::Result<T, ::windows::core::Error> {
    fn function(self, function: &'static str) -> Result<T> {
        self.map_err(|source| Error {
            function: Some(function),
            ..source.into()
        })
    }

    fn context(self, ctx: impl AsRef<str>) -> Result<T> {
        self.map_err(|source| Error {
            context: Some(ctx.as_ref().to_owned()),
            ..source.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    #[test]
    fn test_display_with_context_and_function() {
        let err: Result<()> = Err(Error::target_not_found("pid 42"));
        let err = err
            .context("Failed to resolve message target")
            .function("EnumWindows")
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to resolve message target\nCaused by:\n    no window found for target pid 42 (EnumWindows)"
        );
        assert!(err.is_target_not_found());
        assert_eq!(err.function(), Some("EnumWindows"));
    }

    #[test]
    fn test_context_leaves_ok_untouched() {
        let ok: Result<u32> = Ok(7);
        assert_eq!(ok.context("unused").function("unused"), Ok(7));
    }

    #[test]
    fn test_io_error_conversion_keeps_code() {
        let err: Error = io::Error::from_raw_os_error(5).into();
        match err.kind() {
            ErrorKind::Os { code, .. } => assert_eq!(*code, 5),
            other => panic!("unexpected kind {other:?}"),
        }
    }
}
