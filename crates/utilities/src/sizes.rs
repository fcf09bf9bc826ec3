//! Human-readable byte-count constants for common immediate values.
//!
//! Kibibyte-scale values are pointer-sized; mebibyte-scale and above are 64-bit so they stay
//! representable on 32-bit hosts.

/// Pointer-sized byte count of `n` KiB.
///
/// # Panics
///
/// Panics when `n * 1024` does not fit in `isize`, i.e. `|n| > isize::MAX / 1024`.
#[must_use]
pub const fn kib(n: isize) -> isize {
    match n.checked_mul(1024) {
        Some(bytes) => bytes,
        None => panic!("kib: byte count overflows isize"),
    }
}

/// 64-bit byte count of `n` MiB.
///
/// # Panics
///
/// Panics when `n * 1024 * 1024` does not fit in `i64`, i.e. `|n| > i64::MAX / 2^20`.
#[must_use]
pub const fn mib(n: i64) -> i64 {
    match n.checked_mul(1024 * 1024) {
        Some(bytes) => bytes,
        None => panic!("mib: byte count overflows i64"),
    }
}

/// 1 KiB.
pub const SIZE_1KB: isize = kib(1);
/// 4 KiB.
pub const SIZE_4KB: isize = SIZE_1KB * 4;
/// 16 KiB.
pub const SIZE_16KB: isize = SIZE_1KB * 16;
/// 32 KiB.
pub const SIZE_32KB: isize = SIZE_1KB * 32;
/// 64 KiB.
pub const SIZE_64KB: isize = SIZE_1KB * 64;
/// 128 KiB.
pub const SIZE_128KB: isize = SIZE_1KB * 128;
/// 256 KiB.
pub const SIZE_256KB: isize = SIZE_1KB * 256;

/// 1 MiB.
pub const SIZE_1MB: i64 = mib(1);
/// 8 MiB.
pub const SIZE_8MB: i64 = SIZE_1MB * 8;
/// 16 MiB.
pub const SIZE_16MB: i64 = SIZE_1MB * 16;
/// 32 MiB.
pub const SIZE_32MB: i64 = SIZE_1MB * 32;
/// 64 MiB.
pub const SIZE_64MB: i64 = SIZE_1MB * 64;
/// 256 MiB.
pub const SIZE_256MB: i64 = SIZE_1MB * 256;
/// 1 GiB.
pub const SIZE_1GB: i64 = SIZE_1MB * 1024;
/// 4 GiB.
pub const SIZE_4GB: i64 = SIZE_1GB * 4;

const _: () = assert_size_table();

const fn assert_size_table() {
    assert!(SIZE_1KB == 1 << 10, "1kb must be 2^10");
    assert!(SIZE_256KB == 1 << 18, "256kb must be 2^18");
    assert!(SIZE_1MB == 1 << 20, "1mb must be 2^20");
    assert!(SIZE_1GB == 1 << 30, "1gb must be 2^30");
    assert!(SIZE_4GB == 4 * 1024 * 1024 * 1024, "4gb must be 2^32");
}
