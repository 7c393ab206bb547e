//! Liquidity pool (`AmmInfo`) layouts for each program generation.

use super::{
    Field,
    FieldType::{PublicKey, U64, U128},
    Schema,
};

/// Pool layout of the second program generation.
pub const AMM_INFO_LEGACY: Schema = Schema {
    name: "AmmInfoLegacy",
    fields: &[
        Field::new("status", U64),
        Field::new("nonce", U64),
        Field::new("order_num", U64),
        Field::new("depth", U64),
        Field::new("coin_decimals", U64),
        Field::new("pc_decimals", U64),
        Field::new("state", U64),
        Field::new("reset_flag", U64),
        Field::new("fee", U64),
        Field::new("min_size", U64),
        Field::new("vol_max_cut_ratio", U64),
        Field::new("pnl_ratio", U64),
        Field::new("amount_wave_ratio", U64),
        Field::new("coin_lot_size", U64),
        Field::new("pc_lot_size", U64),
        Field::new("min_price_multiplier", U64),
        Field::new("max_price_multiplier", U64),
        Field::new("need_take_pnl_coin", U64),
        Field::new("need_take_pnl_pc", U64),
        Field::new("total_pnl_x", U64),
        Field::new("total_pnl_y", U64),
        Field::new("system_decimals_value", U64),
        Field::new("pool_coin_token_account", PublicKey),
        Field::new("pool_pc_token_account", PublicKey),
        Field::new("coin_mint_address", PublicKey),
        Field::new("pc_mint_address", PublicKey),
        Field::new("lp_mint_address", PublicKey),
        Field::new("amm_open_orders", PublicKey),
        Field::new("serum_market", PublicKey),
        Field::new("serum_program_id", PublicKey),
        Field::new("amm_target_orders", PublicKey),
        Field::new("amm_quantities", PublicKey),
        Field::new("pool_withdraw_queue", PublicKey),
        Field::new("pool_temp_lp_token_account", PublicKey),
        Field::new("amm_owner", PublicKey),
        Field::new("pnl_owner", PublicKey),
    ],
};

pub const AMM_INFO_V3: Schema = Schema {
    name: "AmmInfoV3",
    fields: &[
        Field::new("status", U64),
        Field::new("nonce", U64),
        Field::new("order_num", U64),
        Field::new("depth", U64),
        Field::new("coin_decimals", U64),
        Field::new("pc_decimals", U64),
        Field::new("state", U64),
        Field::new("reset_flag", U64),
        Field::new("fee", U64),
        Field::new("min_separate", U64),
        Field::new("min_size", U64),
        Field::new("vol_max_cut_ratio", U64),
        Field::new("pnl_ratio", U64),
        Field::new("amount_wave_ratio", U64),
        Field::new("coin_lot_size", U64),
        Field::new("pc_lot_size", U64),
        Field::new("min_price_multiplier", U64),
        Field::new("max_price_multiplier", U64),
        Field::new("need_take_pnl_coin", U64),
        Field::new("need_take_pnl_pc", U64),
        Field::new("total_pnl_x", U64),
        Field::new("total_pnl_y", U64),
        Field::new("pool_total_deposit_pc", U64),
        Field::new("pool_total_deposit_coin", U64),
        Field::new("system_decimals_value", U64),
        Field::new("pool_coin_token_account", PublicKey),
        Field::new("pool_pc_token_account", PublicKey),
        Field::new("coin_mint_address", PublicKey),
        Field::new("pc_mint_address", PublicKey),
        Field::new("lp_mint_address", PublicKey),
        Field::new("amm_open_orders", PublicKey),
        Field::new("serum_market", PublicKey),
        Field::new("serum_program_id", PublicKey),
        Field::new("amm_target_orders", PublicKey),
        Field::new("amm_quantities", PublicKey),
        Field::new("pool_withdraw_queue", PublicKey),
        Field::new("pool_temp_lp_token_account", PublicKey),
        Field::new("amm_owner", PublicKey),
        Field::new("pnl_owner", PublicKey),
        Field::new("srm_token_account", PublicKey),
    ],
};

pub const AMM_INFO_V4: Schema = Schema {
    name: "AmmInfoV4",
    fields: &[
        Field::new("status", U64),
        Field::new("nonce", U64),
        Field::new("order_num", U64),
        Field::new("depth", U64),
        Field::new("coin_decimals", U64),
        Field::new("pc_decimals", U64),
        Field::new("state", U64),
        Field::new("reset_flag", U64),
        Field::new("min_size", U64),
        Field::new("vol_max_cut_ratio", U64),
        Field::new("amount_wave_ratio", U64),
        Field::new("coin_lot_size", U64),
        Field::new("pc_lot_size", U64),
        Field::new("min_price_multiplier", U64),
        Field::new("max_price_multiplier", U64),
        Field::new("system_decimals_value", U64),
        // fees
        Field::new("min_separate_numerator", U64),
        Field::new("min_separate_denominator", U64),
        Field::new("trade_fee_numerator", U64),
        Field::new("trade_fee_denominator", U64),
        Field::new("pnl_numerator", U64),
        Field::new("pnl_denominator", U64),
        Field::new("swap_fee_numerator", U64),
        Field::new("swap_fee_denominator", U64),
        // output data
        Field::new("need_take_pnl_coin", U64),
        Field::new("need_take_pnl_pc", U64),
        Field::new("total_pnl_pc", U64),
        Field::new("total_pnl_coin", U64),
        Field::new("pool_open_time", U64),
        Field::new("punish_pc_amount", U64),
        Field::new("punish_coin_amount", U64),
        Field::new("orderbook_to_init_time", U64),
        Field::new("swap_coin_in_amount", U128),
        Field::new("swap_pc_out_amount", U128),
        Field::new("swap_coin_2_pc_fee", U64),
        Field::new("swap_pc_in_amount", U128),
        Field::new("swap_coin_out_amount", U128),
        Field::new("swap_pc_2_coin_fee", U64),
        Field::new("pool_coin_token_account", PublicKey),
        Field::new("pool_pc_token_account", PublicKey),
        Field::new("coin_mint_address", PublicKey),
        Field::new("pc_mint_address", PublicKey),
        Field::new("lp_mint_address", PublicKey),
        Field::new("amm_open_orders", PublicKey),
        Field::new("serum_market", PublicKey),
        Field::new("serum_program_id", PublicKey),
        Field::new("amm_target_orders", PublicKey),
        Field::new("pool_withdraw_queue", PublicKey),
        Field::new("pool_temp_lp_token_account", PublicKey),
        Field::new("amm_owner", PublicKey),
        Field::new("pnl_owner", PublicKey),
    ],
};

/// Stable-curve pool layout. Carries the curve invariant in `current_k`.
pub const AMM_INFO_STABLE: Schema = Schema {
    name: "AmmInfoStable",
    fields: &[
        Field::new("status", U64),
        Field::new("own_address", PublicKey),
        Field::new("nonce", U64),
        Field::new("order_num", U64),
        Field::new("depth", U64),
        Field::new("coin_decimals", U64),
        Field::new("pc_decimals", U64),
        Field::new("state", U64),
        Field::new("reset_flag", U64),
        Field::new("min_size", U64),
        Field::new("vol_max_cut_ratio", U64),
        Field::new("amount_wave_ratio", U64),
        Field::new("coin_lot_size", U64),
        Field::new("pc_lot_size", U64),
        Field::new("min_price_multiplier", U64),
        Field::new("max_price_multiplier", U64),
        Field::new("system_decimals_value", U64),
        Field::new("amm_max_price", U64),
        Field::new("amm_middle_price", U64),
        Field::new("amm_price_multiplier", U64),
        // fees
        Field::new("min_separate_numerator", U64),
        Field::new("min_separate_denominator", U64),
        Field::new("trade_fee_numerator", U64),
        Field::new("trade_fee_denominator", U64),
        Field::new("pnl_numerator", U64),
        Field::new("pnl_denominator", U64),
        Field::new("swap_fee_numerator", U64),
        Field::new("swap_fee_denominator", U64),
        // output data
        Field::new("need_take_pnl_coin", U64),
        Field::new("need_take_pnl_pc", U64),
        Field::new("total_pnl_pc", U64),
        Field::new("total_pnl_coin", U64),
        Field::new("pool_total_deposit_pc", U128),
        Field::new("pool_total_deposit_coin", U128),
        Field::new("swap_coin_in_amount", U128),
        Field::new("swap_pc_out_amount", U128),
        Field::new("swap_pc_in_amount", U128),
        Field::new("swap_coin_out_amount", U128),
        Field::new("swap_pc_fee", U64),
        Field::new("swap_coin_fee", U64),
        Field::new("pool_coin_token_account", PublicKey),
        Field::new("pool_pc_token_account", PublicKey),
        Field::new("coin_mint_address", PublicKey),
        Field::new("pc_mint_address", PublicKey),
        Field::new("lp_mint_address", PublicKey),
        Field::new("amm_open_orders", PublicKey),
        Field::new("serum_market", PublicKey),
        Field::new("serum_program_id", PublicKey),
        Field::new("amm_target_orders", PublicKey),
        Field::new("pool_withdraw_queue", PublicKey),
        Field::new("pool_temp_lp_token_account", PublicKey),
        Field::new("amm_owner", PublicKey),
        Field::new("pnl_owner", PublicKey),
        Field::new("current_k", U128),
        Field::new("padding1", U128),
        Field::new("padding2", PublicKey),
    ],
};

const _: () = assert!(AMM_INFO_LEGACY.span() == 624);
const _: () = assert!(AMM_INFO_V3.span() == 680);
const _: () = assert!(AMM_INFO_V4.span() == 752);
const _: () = assert!(AMM_INFO_STABLE.span() == 872);
