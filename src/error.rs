use std::fmt;
use std::path::PathBuf;

/// Coarse failure class, used by the top-level handler to pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Input,
    Resource,
}

#[derive(Debug)]
pub enum SampleError {
    // 配置错误
    WithReplacementUnsupported,
    UnspecifiedSizeUnsupported(&'static str),
    InvalidConfig(String),

    // 输入错误
    StdinUnsupported,
    FileNotFound(PathBuf),
    FileAccess(PathBuf, std::io::Error),
    OffsetOutOfRange { offset: u64, size: u64 },

    // 资源错误
    Mmap(PathBuf, std::io::Error),
    Allocation(usize),
    Io(std::io::Error),
}

impl SampleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WithReplacementUnsupported
            | Self::UnspecifiedSizeUnsupported(_)
            | Self::InvalidConfig(_) => ErrorKind::Configuration,
            Self::StdinUnsupported
            | Self::FileNotFound(_)
            | Self::FileAccess(..)
            | Self::OffsetOutOfRange { .. } => ErrorKind::Input,
            Self::Mmap(..) | Self::Allocation(_) | Self::Io(_) => ErrorKind::Resource,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::Configuration => 2,
            ErrorKind::Input => 3,
            ErrorKind::Resource => 4,
        }
    }
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::WithReplacementUnsupported => {
                write!(f, "sampling with replacement is not yet supported")
            }
            Self::UnspecifiedSizeUnsupported(backend) => write!(
                f,
                "sampling without a specified sample size is not supported with the {} backend",
                backend
            ),
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::StdinUnsupported => write!(f, "standard input is not supported, a seekable file is required"),
            Self::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            Self::FileAccess(path, e) => write!(f, "File access error ({}): {}", path.display(), e),
            Self::OffsetOutOfRange { offset, size } => {
                write!(f, "Line offset {} is beyond end of input ({} bytes)", offset, size)
            }
            Self::Mmap(path, e) => write!(f, "Memory mapping failed ({}): {}", path.display(), e),
            Self::Allocation(slots) => {
                write!(f, "Could not allocate offset reservoir of {} slots", slots)
            }
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileAccess(_, e) | Self::Mmap(_, e) | Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SampleError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// 便捷的Result类型
pub type Result<T> = std::result::Result<T, SampleError>;
