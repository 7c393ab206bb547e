//! Fixed binary layouts for liquidity, staking and SPL token accounts.
//!
//! Every account this crate reads has a chain-defined layout: an ordered list
//! of fields with fixed widths, packed without padding and encoded
//! little-endian. Each (entity, version) pair is described by a flat
//! [`Schema`] constant. Schemas never extend one another, even where two
//! generations share a prefix, so adding a generation cannot change how an
//! older one decodes.
//!
//! [`LayoutId`] enumerates exactly the registered pairs, which makes
//! [`LayoutId::schema`] infallible. The keyed lookup [`schema_for`] is kept
//! for callers that carry the entity kind and version separately.

pub mod amm;
pub mod codec;
pub mod stake;
pub mod token;

use std::fmt::Display;

use thiserror::Error;

pub use codec::{Record, Value, decode, decode_with, encode};

/// Width of a public key field in bytes.
pub const PUBKEY_LEN: usize = 32;

/// Primitive field types understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    U8,
    U32,
    U64,
    /// Stored as two little-endian u64 halves, low half first.
    U128,
    PublicKey,
    /// Opaque bytes, read verbatim.
    Blob(usize),
    /// Fixed-length array of another field type.
    Seq(&'static FieldType, usize),
}

impl FieldType {
    pub const fn width(&self) -> usize {
        match self {
            FieldType::U8 => 1,
            FieldType::U32 => 4,
            FieldType::U64 => 8,
            FieldType::U128 => 16,
            FieldType::PublicKey => PUBKEY_LEN,
            FieldType::Blob(len) => *len,
            FieldType::Seq(inner, len) => inner.width() * *len,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
}

impl Field {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

/// An ordered, immutable description of one account layout.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    /// Total byte width of the layout.
    pub const fn span(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].ty.width();
            i += 1;
        }
        total
    }

    /// Byte offset of the named field, if the schema has it.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let mut offset = 0;
        for field in self.fields {
            if field.name == name {
                return Some(offset);
            }
            offset += field.ty.width();
        }
        None
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub fn span(schema: &Schema) -> usize {
    schema.span()
}

/// The kinds of account this crate knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    AmmInfo,
    StakeInfo,
    UserStakeInfo,
    Mint,
    TokenAccount,
}

/// Historical layout generations.
///
/// `Stable` is the stable-curve pool layout, published by the fifth program
/// generation alongside the `V5` user stake layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutVersion {
    Legacy,
    V3,
    V4,
    V5,
    Stable,
}

impl LayoutVersion {
    /// Maps the numeric pool version used in pool lists to its layout.
    pub fn from_pool_version(version: u8) -> Option<Self> {
        match version {
            2 => Some(LayoutVersion::Legacy),
            3 => Some(LayoutVersion::V3),
            4 => Some(LayoutVersion::V4),
            5 => Some(LayoutVersion::Stable),
            _ => None,
        }
    }
}

/// One registered (entity, version) layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutId {
    AmmLegacy,
    AmmV3,
    AmmV4,
    AmmStable,
    StakeLegacy,
    StakeV4,
    UserStakeLegacy,
    /// The "v3.1" user stake layout: u128 reward debt plus reserved words.
    UserStakeV3,
    UserStakeV4,
    UserStakeV5,
    Mint,
    TokenAccount,
}

impl LayoutId {
    pub const ALL: [LayoutId; 12] = [
        LayoutId::AmmLegacy,
        LayoutId::AmmV3,
        LayoutId::AmmV4,
        LayoutId::AmmStable,
        LayoutId::StakeLegacy,
        LayoutId::StakeV4,
        LayoutId::UserStakeLegacy,
        LayoutId::UserStakeV3,
        LayoutId::UserStakeV4,
        LayoutId::UserStakeV5,
        LayoutId::Mint,
        LayoutId::TokenAccount,
    ];

    pub fn new(kind: EntityKind, version: LayoutVersion) -> Option<Self> {
        use EntityKind as K;
        use LayoutVersion as V;

        let id = match (kind, version) {
            (K::AmmInfo, V::Legacy) => LayoutId::AmmLegacy,
            (K::AmmInfo, V::V3) => LayoutId::AmmV3,
            (K::AmmInfo, V::V4) => LayoutId::AmmV4,
            (K::AmmInfo, V::Stable) => LayoutId::AmmStable,
            (K::StakeInfo, V::Legacy) => LayoutId::StakeLegacy,
            (K::StakeInfo, V::V4) => LayoutId::StakeV4,
            (K::UserStakeInfo, V::Legacy) => LayoutId::UserStakeLegacy,
            (K::UserStakeInfo, V::V3) => LayoutId::UserStakeV3,
            (K::UserStakeInfo, V::V4) => LayoutId::UserStakeV4,
            (K::UserStakeInfo, V::V5) => LayoutId::UserStakeV5,
            (K::Mint, V::Legacy) => LayoutId::Mint,
            (K::TokenAccount, V::Legacy) => LayoutId::TokenAccount,
            _ => return None,
        };
        Some(id)
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            LayoutId::AmmLegacy | LayoutId::AmmV3 | LayoutId::AmmV4 | LayoutId::AmmStable => {
                EntityKind::AmmInfo
            }
            LayoutId::StakeLegacy | LayoutId::StakeV4 => EntityKind::StakeInfo,
            LayoutId::UserStakeLegacy
            | LayoutId::UserStakeV3
            | LayoutId::UserStakeV4
            | LayoutId::UserStakeV5 => EntityKind::UserStakeInfo,
            LayoutId::Mint => EntityKind::Mint,
            LayoutId::TokenAccount => EntityKind::TokenAccount,
        }
    }

    pub fn version(&self) -> LayoutVersion {
        match self {
            LayoutId::AmmLegacy
            | LayoutId::StakeLegacy
            | LayoutId::UserStakeLegacy
            | LayoutId::Mint
            | LayoutId::TokenAccount => LayoutVersion::Legacy,
            LayoutId::AmmV3 | LayoutId::UserStakeV3 => LayoutVersion::V3,
            LayoutId::AmmV4 | LayoutId::StakeV4 | LayoutId::UserStakeV4 => LayoutVersion::V4,
            LayoutId::UserStakeV5 => LayoutVersion::V5,
            LayoutId::AmmStable => LayoutVersion::Stable,
        }
    }

    pub fn schema(&self) -> &'static Schema {
        match self {
            LayoutId::AmmLegacy => &amm::AMM_INFO_LEGACY,
            LayoutId::AmmV3 => &amm::AMM_INFO_V3,
            LayoutId::AmmV4 => &amm::AMM_INFO_V4,
            LayoutId::AmmStable => &amm::AMM_INFO_STABLE,
            LayoutId::StakeLegacy => &stake::STAKE_INFO_LEGACY,
            LayoutId::StakeV4 => &stake::STAKE_INFO_V4,
            LayoutId::UserStakeLegacy => &stake::USER_STAKE_INFO_LEGACY,
            LayoutId::UserStakeV3 => &stake::USER_STAKE_INFO_V3,
            LayoutId::UserStakeV4 => &stake::USER_STAKE_INFO_V4,
            LayoutId::UserStakeV5 => &stake::USER_STAKE_INFO_V5,
            LayoutId::Mint => &token::MINT,
            LayoutId::TokenAccount => &token::TOKEN_ACCOUNT,
        }
    }

    pub fn span(&self) -> usize {
        self.schema().span()
    }

    /// Picks the layout of `kind` whose span equals `len`.
    ///
    /// Spans are distinct within each entity kind, so a buffer length
    /// identifies its generation.
    pub fn detect(kind: EntityKind, len: usize) -> Option<Self> {
        LayoutId::ALL
            .into_iter()
            .find(|id| id.kind() == kind && id.span() == len)
    }
}

impl Display for LayoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.schema().name)
    }
}

pub fn schema_for(kind: EntityKind, version: LayoutVersion) -> Option<&'static Schema> {
    LayoutId::new(kind, version).map(|id| id.schema())
}

/// Errors raised while decoding or encoding a layout.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The buffer length differs from the layout span. Never retried.
    #[error("Layout mismatch for {layout}: expected {expected} bytes, got {actual}")]
    LayoutMismatch {
        layout: LayoutId,
        expected: usize,
        actual: usize,
    },

    #[error("No layout registered for {kind:?} {version:?}")]
    UnknownLayout {
        kind: EntityKind,
        version: LayoutVersion,
    },

    #[error("Field {0} is not present in the record")]
    MissingField(&'static str),

    #[error("Field {0} holds a value of a different type")]
    FieldTypeMismatch(&'static str),
}
