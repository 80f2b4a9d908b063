//! Property-based tests over the market logic.
//!
//! These drive the same pure functions the instruction handlers call, across
//! randomized reserves, discounts, and timestamps up to the instant before
//! maturity.

use anchor_lang::prelude::*;
use proptest::prelude::*;

use crate::constants::WAD;
use crate::logic::liquidity::{deposit, withdraw, withdrawal_amounts};
use crate::logic::swap::{apply, plan_exact_in, plan_exact_out, SwapDirection};
use crate::state::Market;

const MATURITY: i64 = 1_000_000;

fn market_with(pt_wad: u128, discount_bps: u16) -> Market {
    let mut m = Market {
        pool_id: [3u8; 32],
        cycle_id: 7,
        pt_mint: Pubkey::default(),
        quote_mint: Pubkey::default(),
        pt_vault: Pubkey::default(),
        quote_vault: Pubkey::default(),
        pt_decimals: 9,
        quote_decimals: 6,
        created_at: 0,
        maturity: MATURITY,
        activated: false,
        banned: false,
        pt_reserve: 0,
        virtual_quote_reserve: 0,
        real_quote_reserve: 0,
        total_lp_shares: 0,
        accumulated_fees_pt: 0,
        accumulated_fees_quote: 0,
        protocol_fees_pt: 0,
        protocol_fees_quote: 0,
        bump: 254,
    };
    deposit(&mut m, pt_wad, discount_bps).unwrap();
    m
}

// ============================================================================
// Test Strategies
// ============================================================================

/// PT reserve between 1 and 1 billion whole tokens.
fn pt_reserves() -> impl Strategy<Value = u128> {
    (1u64..1_000_000_000).prop_map(|v| v as u128 * WAD)
}

/// Bootstrap discount across its whole valid range.
fn discounts() -> impl Strategy<Value = u16> {
    1u16..10_000
}

/// Timestamps from creation up to the last tradable second.
fn trade_times() -> impl Strategy<Value = i64> {
    prop_oneof![0i64..MATURITY, Just(MATURITY - 1)]
}

/// Swap inputs between a millionth of a token and a million tokens.
fn swap_amounts() -> impl Strategy<Value = u128> {
    (1u64..1_000_000_000_000).prop_map(|v| v as u128 * (WAD / 1_000_000))
}

// ============================================================================
// Swap Properties
// ============================================================================

proptest! {
    /// A preview and the execution it precedes price through one function;
    /// planning twice against unchanged state returns identical amounts.
    #[test]
    fn prop_preview_matches_execution(
        pt in pt_reserves(),
        discount in discounts(),
        amount_in in swap_amounts(),
        now in trade_times(),
    ) {
        let mut m = market_with(pt, discount);
        if let Ok(preview) = plan_exact_in(&m, SwapDirection::QuoteToPt, amount_in, now) {
            let executed = plan_exact_in(&m, SwapDirection::QuoteToPt, amount_in, now).unwrap();
            prop_assert_eq!(preview, executed);
            apply(&mut m, &executed).unwrap();
            prop_assert_eq!(m.pt_reserve, pt - executed.amounts.amount_out);
        }
    }

    /// Fee split conserves the fee exactly, and the applied swap books the
    /// same total into the two fee accumulators.
    #[test]
    fn prop_fee_conservation(
        pt in pt_reserves(),
        discount in discounts(),
        amount_in in swap_amounts(),
        now in trade_times(),
    ) {
        let mut m = market_with(pt, discount);
        if let Ok(plan) = plan_exact_in(&m, SwapDirection::QuoteToPt, amount_in, now) {
            prop_assert_eq!(
                plan.amounts.lp_fee + plan.amounts.protocol_fee,
                plan.amounts.fee_amount
            );
            apply(&mut m, &plan).unwrap();
            prop_assert_eq!(
                m.accumulated_fees_quote + m.protocol_fees_quote,
                plan.amounts.fee_amount
            );
        }
    }

    /// Buying and immediately selling back never extracts value: the quote
    /// returned is strictly less than the quote paid in, and the sell always
    /// fits inside the real quote the buy deposited.
    #[test]
    fn prop_round_trip_loses_value(
        pt in pt_reserves(),
        discount in discounts(),
        quote_in in swap_amounts(),
        now in trade_times(),
    ) {
        let mut m = market_with(pt, discount);
        let buy = match plan_exact_in(&m, SwapDirection::QuoteToPt, quote_in, now) {
            Ok(p) if p.amounts.amount_out > 0 => p,
            _ => return Ok(()),
        };
        apply(&mut m, &buy).unwrap();

        let sell = plan_exact_in(&m, SwapDirection::PtToQuote, buy.amounts.amount_out, now);
        if let Ok(sell) = sell {
            prop_assert!(sell.amounts.amount_out < quote_in);
            apply(&mut m, &sell).unwrap();
        }
        // reserves are unsigned by construction; what we assert is that no
        // step needed saturation to stay consistent
        prop_assert!(m.pt_reserve <= pt + buy.amounts.amount_out);
        prop_assert!(m.real_quote_reserve <= buy.amounts.amount_in);
    }

    /// Exact-output pricing never undercharges relative to exact-input.
    #[test]
    fn prop_exact_out_dominates_exact_in(
        pt in pt_reserves(),
        discount in discounts(),
        amount_in in swap_amounts(),
        now in trade_times(),
    ) {
        let m = market_with(pt, discount);
        let fwd = match plan_exact_in(&m, SwapDirection::QuoteToPt, amount_in, now) {
            Ok(p) if p.amounts.amount_out > 0 => p,
            _ => return Ok(()),
        };
        let inv = plan_exact_out(&m, SwapDirection::QuoteToPt, fwd.amounts.amount_out, now).unwrap();
        prop_assert!(inv.amounts.amount_in >= fwd.amounts.amount_in);
    }
}

// ============================================================================
// Decay Properties
// ============================================================================

proptest! {
    /// Both effective reserves shift by the same amount, in opposite
    /// directions, from one shared decay factor.
    #[test]
    fn prop_decay_shifts_symmetrically(
        pt in pt_reserves(),
        discount in discounts(),
        now in trade_times(),
    ) {
        let m = market_with(pt, discount);
        let eff = m.effective_reserves_at(now).unwrap();
        prop_assert_eq!(
            eff.quote - m.virtual_quote_reserve,
            m.pt_reserve - eff.pt
        );
    }

    /// At maturity the spot price is exactly parity, for every discount.
    #[test]
    fn prop_price_reaches_parity_at_maturity(
        pt in pt_reserves(),
        discount in discounts(),
    ) {
        let m = market_with(pt, discount);
        prop_assert_eq!(m.spot_price_wad(MATURITY).unwrap(), WAD);
        // and stays there afterwards
        prop_assert_eq!(m.spot_price_wad(MATURITY + 12_345).unwrap(), WAD);
    }

    /// Decay only ever moves the price toward parity, monotonically.
    #[test]
    fn prop_price_moves_toward_parity(
        pt in pt_reserves(),
        discount in discounts(),
        earlier in 0i64..MATURITY,
        delta in 1i64..MATURITY,
    ) {
        let m = market_with(pt, discount);
        let later = (earlier + delta).min(MATURITY);
        let p0 = m.spot_price_wad(earlier).unwrap();
        let p1 = m.spot_price_wad(later).unwrap();
        prop_assert!(p0 <= p1);
        prop_assert!(p1 <= WAD);
    }
}

// ============================================================================
// Liquidity Properties
// ============================================================================

proptest! {
    /// The withdrawal view reports exactly what the mutating withdrawal
    /// pays, bucket by bucket.
    #[test]
    fn prop_withdrawal_view_is_exact(
        pt in pt_reserves(),
        discount in discounts(),
        fees_pt in 0u128..1_000_000 * WAD,
        fees_quote in 0u128..1_000_000 * WAD,
        real_quote in 0u128..1_000_000 * WAD,
        numerator in 1u64..=1_000,
    ) {
        let mut m = market_with(pt, discount);
        m.accumulated_fees_pt = fees_pt;
        m.accumulated_fees_quote = fees_quote;
        m.real_quote_reserve = real_quote;

        let shares = (m.total_lp_shares / 1_000) * numerator as u128;
        if shares == 0 {
            return Ok(());
        }
        let viewed = withdrawal_amounts(&m, shares).unwrap();
        let paid = withdraw(&mut m, shares).unwrap();
        prop_assert_eq!(viewed, paid);
    }

    /// Deposit then withdraw of the same shares returns no more PT than was
    /// put in.
    #[test]
    fn prop_no_free_pt_from_liquidity_cycle(
        pt in pt_reserves(),
        discount in discounts(),
        extra in pt_reserves(),
    ) {
        let mut m = market_with(pt, discount);
        let outcome = deposit(&mut m, extra, 0).unwrap();
        let paid = withdraw(&mut m, outcome.shares_minted).unwrap();
        prop_assert!(paid.pt_total().unwrap() <= extra);
    }

    /// Proportional deposits and withdrawals leave the spot price unchanged
    /// up to rounding.
    #[test]
    fn prop_liquidity_changes_preserve_price(
        pt in pt_reserves(),
        discount in discounts(),
        extra in pt_reserves(),
        now in trade_times(),
    ) {
        let mut m = market_with(pt, discount);
        let before = m.spot_price_wad(now).unwrap();
        deposit(&mut m, extra, 0).unwrap();
        let after = m.spot_price_wad(now).unwrap();
        // three independent floor divisions bound the drift at 2 wei
        prop_assert!(before.abs_diff(after) <= 2);
    }
}
