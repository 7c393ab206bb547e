//! Staking pool (`StakeInfo`) and per-user stake (`UserStakeInfo`) layouts.

use super::{
    Field,
    FieldType::{Blob, PublicKey, Seq, U8, U64, U128},
    Schema,
};

/// Reserved trailing words carried by the u128 reward-debt generations.
const RESERVED_WORDS: usize = 17;

pub const STAKE_INFO_LEGACY: Schema = Schema {
    name: "StakeInfoLegacy",
    fields: &[
        Field::new("state", U64),
        Field::new("nonce", U64),
        Field::new("pool_lp_token_account", PublicKey),
        Field::new("pool_reward_token_account", PublicKey),
        Field::new("owner", PublicKey),
        Field::new("fee_owner", PublicKey),
        Field::new("fee_y", U64),
        Field::new("fee_x", U64),
        Field::new("total_reward", U64),
        Field::new("reward_per_share_net", U128),
        Field::new("last_block", U64),
        Field::new("reward_per_block", U64),
    ],
};

/// Dual-reward staking pool. The owner moved to the end of the account.
pub const STAKE_INFO_V4: Schema = Schema {
    name: "StakeInfoV4",
    fields: &[
        Field::new("state", U64),
        Field::new("nonce", U64),
        Field::new("pool_lp_token_account", PublicKey),
        Field::new("pool_reward_token_account", PublicKey),
        Field::new("total_reward", U64),
        Field::new("per_share", U128),
        Field::new("per_block", U64),
        Field::new("option", U8),
        Field::new("pool_reward_token_account_b", PublicKey),
        Field::new("reserved", Blob(7)),
        Field::new("total_reward_b", U64),
        Field::new("per_share_b", U128),
        Field::new("per_block_b", U64),
        Field::new("last_block", U64),
        Field::new("owner", PublicKey),
    ],
};

pub const USER_STAKE_INFO_LEGACY: Schema = Schema {
    name: "UserStakeInfoLegacy",
    fields: &[
        Field::new("state", U64),
        Field::new("pool_id", PublicKey),
        Field::new("staker_owner", PublicKey),
        Field::new("deposit_balance", U64),
        Field::new("reward_debt", U64),
    ],
};

pub const USER_STAKE_INFO_V3: Schema = Schema {
    name: "UserStakeInfoV3",
    fields: &[
        Field::new("state", U64),
        Field::new("pool_id", PublicKey),
        Field::new("staker_owner", PublicKey),
        Field::new("deposit_balance", U64),
        Field::new("reward_debt", U128),
        Field::new("reserved", Seq(&U64, RESERVED_WORDS)),
    ],
};

pub const USER_STAKE_INFO_V4: Schema = Schema {
    name: "UserStakeInfoV4",
    fields: &[
        Field::new("state", U64),
        Field::new("pool_id", PublicKey),
        Field::new("staker_owner", PublicKey),
        Field::new("deposit_balance", U64),
        Field::new("reward_debt", U64),
        Field::new("reward_debt_b", U64),
    ],
};

pub const USER_STAKE_INFO_V5: Schema = Schema {
    name: "UserStakeInfoV5",
    fields: &[
        Field::new("state", U64),
        Field::new("pool_id", PublicKey),
        Field::new("staker_owner", PublicKey),
        Field::new("deposit_balance", U64),
        Field::new("reward_debt", U128),
        Field::new("reward_debt_b", U128),
        Field::new("reserved", Seq(&U64, RESERVED_WORDS)),
    ],
};

const _: () = assert!(STAKE_INFO_LEGACY.span() == 200);
const _: () = assert!(STAKE_INFO_V4.span() == 224);
const _: () = assert!(USER_STAKE_INFO_LEGACY.span() == 88);
const _: () = assert!(USER_STAKE_INFO_V3.span() == 232);
const _: () = assert!(USER_STAKE_INFO_V4.span() == 96);
const _: () = assert!(USER_STAKE_INFO_V5.span() == 248);
