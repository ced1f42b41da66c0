use crate::config::is_stdin;
use crate::error::{Result, SampleError};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

// 打开可 seek 的输入文件
pub fn open_input(path: &Path) -> Result<File> {
    if is_stdin(path) {
        return Err(SampleError::StdinUnsupported);
    }
    if !path.exists() {
        return Err(SampleError::FileNotFound(path.to_path_buf()));
    }
    File::open(path).map_err(|e| SampleError::FileAccess(path.to_path_buf(), e))
}

/// Read-only mapping of an input file. Unmapped and closed on drop.
pub struct FileMapping {
    path: PathBuf,
    size: u64,
    mmap: Option<Mmap>,
}

impl FileMapping {
    pub fn open(path: &Path) -> Result<Self> {
        let file = open_input(path)?;
        let size = file
            .metadata()
            .map_err(|e| SampleError::FileAccess(path.to_path_buf(), e))?
            .len();

        // 空文件不做映射
        let mmap = if size == 0 {
            None
        } else {
            let mmap = unsafe {
                MmapOptions::new()
                    .map(&file)
                    .map_err(|e| SampleError::Mmap(path.to_path_buf(), e))?
            };
            Some(mmap)
        };

        debug!(path = %path.display(), size, "mapped input");

        Ok(Self {
            path: path.to_path_buf(),
            size,
            mmap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }
}
