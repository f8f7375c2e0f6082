//! Kinetis flash configuration field.
//!
//! The 16 bytes at flash offset 0x400 are loaded into the flash controller
//! at reset: backdoor key (8), program protection (4), then FSEC, FOPT,
//! FEPROT and FDPROT. A wrong FSEC secures the part and can disable mass
//! erase for good, so `memory.x` keeps `.text` clear of this window and the
//! `hardware` module places [`FLASH_CONFIG_FIELD`] in it.

/// Flash offset of the field.
pub const FLASH_CONFIG_OFFSET: usize = 0x400;
/// Field length in bytes.
pub const FLASH_CONFIG_LEN: usize = 16;

/// Index of FSEC within the field.
pub const FSEC_INDEX: usize = 12;
/// Index of FOPT within the field.
pub const FOPT_INDEX: usize = 13;

/// Unsecured, mass erase enabled, backdoor key disabled.
pub const FSEC_UNSECURED: u8 = 0xFE;

/// Erased backdoor key and protection bytes, unsecured FSEC, default FOPT.
///
/// As words: `0xFFFF_FFFF` three times, then `0xFFFF_FFFE`.
pub const FLASH_CONFIG_FIELD: [u8; FLASH_CONFIG_LEN] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // backdoor key
    0xFF, 0xFF, 0xFF, 0xFF, // FPROT3..0
    FSEC_UNSECURED, 0xFF, // FSEC, FOPT
    0xFF, 0xFF, // FEPROT, FDPROT
];

/// FSEC.SEC reads `0b10` only on an unsecured part.
pub const fn is_unsecured(fsec: u8) -> bool {
    fsec & 0b0000_0011 == 0b0000_0010
}

/// FSEC.MEEN disables mass erase only when it reads `0b10`.
pub const fn mass_erase_enabled(fsec: u8) -> bool {
    fsec & 0b0011_0000 != 0b0010_0000
}
