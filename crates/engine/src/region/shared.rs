//! Shared Region Backend.
//!
//! This module provides the `mmap`-backed storage backend for the weight
//! table. It supports two sharing shapes:
//! 1. **Anonymous:** A `MAP_SHARED | MAP_ANONYMOUS` mapping, visible to the
//!    creating process and any children forked after construction.
//! 2. **File-backed:** A `MAP_SHARED` mapping of a backing file, visible to
//!    any process that maps the same path. The table also survives the
//!    mapping itself: remapping the file later resumes from the trained
//!    weights.
//!
//! A fresh mapping is zero-filled by the kernel, which is exactly the valid
//! initial state of a [`TablePage`].

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr::NonNull;

use super::page::TablePage;
use crate::common::constants::REGION_BYTES;

// The page must fit the fixed region size; checked here because this is the
// only place that maps raw memory as a TablePage.
const _: () = assert!(size_of::<TablePage>() <= REGION_BYTES);

/// An `mmap`-backed weight table shared beyond this process.
#[derive(Debug)]
pub struct SharedRegion {
    ptr: NonNull<TablePage>,
}

// SAFETY: the mapping stays valid until Drop, the raw pointer is never
// exposed outside `page`, and every access to the page goes through atomic
// cells, so references handed out are safe to use from any thread.
unsafe impl Send for SharedRegion {}
// SAFETY: see Send above; `&SharedRegion` only permits atomic cell access.
unsafe impl Sync for SharedRegion {}

impl SharedRegion {
    /// Maps an anonymous shared region.
    ///
    /// The table starts zeroed and is shared with children forked after this
    /// call; unrelated processes cannot reach it.
    ///
    /// # Errors
    ///
    /// Returns the `mmap` failure as an [`io::Error`].
    pub fn anonymous() -> Result<Self, io::Error> {
        // SAFETY: anonymous mapping with no fd; arguments are a valid
        // PROT/MAP combination for every supported Unix.
        let raw = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                REGION_BYTES,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        Self::from_raw(raw)
    }

    /// Maps `path` as a shared region.
    ///
    /// When `create_missing` is set, the backing file is created and sized on
    /// first use; otherwise a missing file is an error. An existing file is
    /// forced to the fixed region size, so a torn or truncated file cannot
    /// produce a short mapping.
    ///
    /// # Errors
    ///
    /// Returns `open`, `ftruncate`, or `mmap` failures as an [`io::Error`];
    /// a path with an interior NUL byte reports `InvalidInput`.
    pub fn file_backed(path: &Path, create_missing: bool) -> Result<Self, io::Error> {
        let cpath = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;

        let mut oflags = libc::O_RDWR;
        if create_missing {
            oflags |= libc::O_CREAT;
        }
        // SAFETY: cpath is a valid NUL-terminated string for the duration of
        // the call.
        let fd = unsafe { libc::open(cpath.as_ptr(), oflags, 0o600 as libc::c_uint) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }

        // SAFETY: fd was just opened read-write; sizing a file already at
        // REGION_BYTES is a no-op.
        if unsafe { libc::ftruncate(fd, REGION_BYTES as libc::off_t) } != 0 {
            let err = io::Error::last_os_error();
            // SAFETY: fd came from the open above and is closed exactly once.
            let _ = unsafe { libc::close(fd) };
            return Err(err);
        }

        // SAFETY: fd is a valid descriptor sized to REGION_BYTES and the
        // PROT/MAP combination matches the open mode.
        let raw = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                REGION_BYTES,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd,
                0,
            )
        };
        // The mapping holds its own reference to the file.
        // SAFETY: fd came from the open above and is closed exactly once.
        let _ = unsafe { libc::close(fd) };
        Self::from_raw(raw)
    }

    fn from_raw(raw: *mut libc::c_void) -> Result<Self, io::Error> {
        if raw == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }
        let ptr = NonNull::new(raw.cast::<TablePage>())
            .ok_or_else(|| io::Error::other("mmap returned a null mapping"))?;
        Ok(Self { ptr })
    }

    /// Returns the table handle.
    #[inline]
    pub fn page(&self) -> &TablePage {
        // SAFETY: the mapping is page-aligned, at least REGION_BYTES long,
        // and lives until Drop. TablePage is repr(C), fits the region, and
        // every bit pattern of its atomic cells is a valid value, so the
        // zero-filled (or previously written) bytes are a valid TablePage.
        unsafe { self.ptr.as_ref() }
    }
}

impl Drop for SharedRegion {
    fn drop(&mut self) {
        // SAFETY: ptr and REGION_BYTES describe exactly the mapping created
        // in `from_raw`, and it is unmapped exactly once.
        let _ = unsafe { libc::munmap(self.ptr.as_ptr().cast(), REGION_BYTES) };
    }
}
