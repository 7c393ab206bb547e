//! SPL token program layouts: mints and token accounts.
//!
//! Optional keys are stored as a u32 tag followed by a full-width key that is
//! zeroed when the tag is 0.

use super::{
    Field,
    FieldType::{PublicKey, U8, U32, U64},
    Schema,
};

pub const MINT: Schema = Schema {
    name: "Mint",
    fields: &[
        Field::new("mint_authority_option", U32),
        Field::new("mint_authority", PublicKey),
        Field::new("supply", U64),
        Field::new("decimals", U8),
        Field::new("is_initialized", U8),
        Field::new("freeze_authority_option", U32),
        Field::new("freeze_authority", PublicKey),
    ],
};

pub const TOKEN_ACCOUNT: Schema = Schema {
    name: "TokenAccount",
    fields: &[
        Field::new("mint", PublicKey),
        Field::new("owner", PublicKey),
        Field::new("amount", U64),
        Field::new("delegate_option", U32),
        Field::new("delegate", PublicKey),
        Field::new("state", U8),
        Field::new("is_native_option", U32),
        Field::new("is_native", U64),
        Field::new("delegated_amount", U64),
        Field::new("close_authority_option", U32),
        Field::new("close_authority", PublicKey),
    ],
};

const _: () = assert!(MINT.span() == 82);
const _: () = assert!(TOKEN_ACCOUNT.span() == 165);
