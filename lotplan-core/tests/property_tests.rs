//! Property tests for planner invariants.
//!
//! Uses proptest to verify:
//! 1. TP ladder ordering: tp1 < tp2 < tp3 with fixed 1.5x / 2x multiples
//! 2. Close split: percentages always sum to 100
//! 3. Repeatability: identical inputs give identical results
//! 4. R:R monotonicity: a larger ratio strictly raises every TP value
//! 5. Recovery termination: the schedule ends at zero remaining drawdown

use lotplan_core::{
    evaluate, recovery, CloseSplit, GoalType, PairSymbol, PlanInputs, RiskMode, TradeManagement,
};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_pair() -> impl Strategy<Value = PairSymbol> {
    prop::sample::select(PairSymbol::ALL.to_vec())
}

/// 1.0, 1.5, ... 5.0
fn arb_rr_steps() -> impl Strategy<Value = u32> {
    0u32..=8
}

fn rr_from_steps(steps: u32) -> f64 {
    1.0 + f64::from(steps) * 0.5
}

fn arb_money(lo: f64, hi: f64) -> impl Strategy<Value = f64> {
    (lo..hi).prop_map(|v| (v * 100.0).round() / 100.0)
}

fn arb_split() -> impl Strategy<Value = (u8, u8)> {
    (0u8..=100).prop_flat_map(|tp1| (Just(tp1), 0u8..=(100 - tp1)))
}

prop_compose! {
    fn arb_inputs()(
        pair in arb_pair(),
        account in arb_money(1_000.0, 100_000.0),
        percent in (1u32..=100).prop_map(|p| f64::from(p) / 10.0),
        target in arb_money(1.0, 5_000.0),
        stop in (5u32..=200).prop_map(f64::from),
        rr_steps in arb_rr_steps(),
        (tp1, tp2) in arb_split(),
        drawdown in arb_money(0.0, 5_000.0),
        sim_rr in 1.0..5.0_f64,
    ) -> PlanInputs {
        PlanInputs {
            goal_type: GoalType::Monthly,
            target_profit: target,
            account_size: account,
            risk: RiskMode::PercentOfAccount { percent },
            risk_to_reward: rr_from_steps(rr_steps),
            stop_loss_pips: stop,
            pair,
            tp1_close_pct: tp1,
            tp2_close_pct: tp2,
            drawdown_amount: drawdown,
            sim_risk_amount: 10.0,
            sim_risk_to_reward: sim_rr,
            management: TradeManagement::default(),
        }
    }
}

// ── 1. TP ladder ordering ────────────────────────────────────────────

proptest! {
    #[test]
    fn tp_ladder_is_strictly_ordered(inputs in arb_inputs()) {
        let result = evaluate(&inputs).unwrap();
        let tp = &result.take_profits;

        prop_assert!(tp.tp1.pips < tp.tp2.pips);
        prop_assert!(tp.tp2.pips < tp.tp3.pips);
        prop_assert_eq!(tp.tp2.pips, tp.tp1.pips * 1.5);
        prop_assert_eq!(tp.tp3.pips, tp.tp1.pips * 2.0);
        prop_assert!(result.lot_size >= 0.0);
    }
}

// ── 2. Close split ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn close_split_sums_to_one_hundred((tp1, tp2) in arb_split()) {
        let split = CloseSplit::new(tp1, tp2).unwrap();
        let sum: u32 = split.as_array().iter().map(|p| u32::from(*p)).sum();
        prop_assert_eq!(sum, 100);
    }

    #[test]
    fn engine_reports_the_same_split((tp1, tp2) in arb_split(), inputs in arb_inputs()) {
        let inputs = PlanInputs { tp1_close_pct: tp1, tp2_close_pct: tp2, ..inputs };
        let result = evaluate(&inputs).unwrap();
        let [a, b, c] = result.close_split();
        prop_assert_eq!(u32::from(a) + u32::from(b) + u32::from(c), 100);
        prop_assert_eq!(a, tp1);
        prop_assert_eq!(b, tp2);
    }
}

// ── 3. Repeatability ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn evaluation_is_repeatable(inputs in arb_inputs()) {
        let a = evaluate(&inputs).unwrap();
        let b = evaluate(&inputs).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
        prop_assert_eq!(a, b);
    }
}

// ── 4. R:R monotonicity ──────────────────────────────────────────────

proptest! {
    #[test]
    fn larger_ratio_raises_every_tp_value(
        inputs in arb_inputs(),
        low in 0u32..8,
        bump in 1u32..=8,
    ) {
        let high = (low + bump).min(8);
        prop_assume!(high > low);

        let lo = evaluate(&PlanInputs { risk_to_reward: rr_from_steps(low), ..inputs.clone() }).unwrap();
        let hi = evaluate(&PlanInputs { risk_to_reward: rr_from_steps(high), ..inputs }).unwrap();
        // Monotonicity needs a non-empty position.
        prop_assume!(lo.lot_size > 0.0);

        prop_assert!(hi.take_profits.tp1.dollar_value > lo.take_profits.tp1.dollar_value);
        prop_assert!(hi.take_profits.tp2.dollar_value > lo.take_profits.tp2.dollar_value);
        prop_assert!(hi.take_profits.tp3.dollar_value > lo.take_profits.tp3.dollar_value);
    }
}

// ── 5. Recovery termination ──────────────────────────────────────────

proptest! {
    #[test]
    fn recovery_ends_at_zero(
        drawdown in arb_money(1.0, 9_000.0),
        sim_risk in arb_money(1.0, 1_000.0),
        sim_rr in 1.0..5.0_f64,
    ) {
        let plan = recovery::plan(drawdown, sim_risk, sim_rr).unwrap().unwrap();
        let steps: Vec<_> = plan.schedule.iter().collect();

        prop_assert_eq!(steps.len() as u64, plan.trades_needed);
        let last = steps.last().unwrap();
        prop_assert_eq!(last.trade_index, plan.trades_needed);
        prop_assert_eq!(last.remaining_drawdown, 0.0);
        prop_assert!(last.cumulative_profit >= drawdown);

        // Only an exact multiple can reach zero before the final trade, and
        // then only on the second-to-last one.
        for step in &steps[..steps.len() - 1] {
            if step.remaining_drawdown == 0.0 {
                prop_assert_eq!(step.trade_index, plan.trades_needed - 1);
            }
        }
    }

    #[test]
    fn exact_multiple_schedules_quotient_plus_one(
        per_trade in (1u32..=500).prop_map(f64::from),
        multiple in 1u32..=50,
    ) {
        let drawdown = per_trade * f64::from(multiple);
        let plan = recovery::plan(drawdown, per_trade, 1.0).unwrap().unwrap();

        prop_assert_eq!(plan.trades_needed, u64::from(multiple) + 1);
        let exact = plan.schedule.step(u64::from(multiple)).unwrap();
        prop_assert_eq!(exact.remaining_drawdown, 0.0);
        prop_assert_eq!(plan.schedule.step(plan.trades_needed).unwrap().remaining_drawdown, 0.0);
    }
}
