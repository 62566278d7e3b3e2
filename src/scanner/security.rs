//! Permission-bits predicate for security-relevant catalog types.

use std::fs::Metadata;

/// Group and other rwx bits — the bits that must be clear for a file to
/// count as secure.
pub const GROUP_OTHER_BITS: u32 = 0o077;

/// A mode is secure when no group/other permission bit is set.
#[must_use]
pub const fn mode_is_secure(mode: u32) -> bool {
    mode & GROUP_OTHER_BITS == 0
}

/// Permission mode bits from already-fetched metadata. The walker probes
/// each candidate path once; the security check reads that same stat result.
#[cfg(unix)]
#[must_use]
pub fn mode_bits(meta: &Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;

    Some(meta.permissions().mode())
}

/// Mode bits are a POSIX concept; elsewhere the check always reports unknown.
#[cfg(not(unix))]
#[must_use]
pub fn mode_bits(_meta: &Metadata) -> Option<u32> {
    None
}
