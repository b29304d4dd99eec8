//! Markdown rendering of a computed plan.

use lotplan_core::advisory::EXECUTION_DISCLAIMER;
use lotplan_core::{PairCategory, PairSymbol, TradePlanResult};

pub fn render_markdown(result: &TradePlanResult) -> String {
    let mut report = format!(
        "# Trade Calculation Summary\n\n\
- Goal Type: `{}`\n\
- Target Profit: `${:.2}`\n\
- Account Size: `${:.2}`\n\
- Risk Amount: `${:.2}`\n\
- Stop Loss: `{} pips` -> `${:.2}`\n\
- R:R Ratio: `1:{}`\n\
- Currency Pair: `{}`\n\
- Pip Value: `${}/pip`\n\
- Lot Size: `{:.2} lots`\n",
        result.goal_type,
        result.target_profit,
        result.account_size,
        result.risk_amount,
        result.stop_loss_pips,
        result.stop_loss_value,
        result.risk_to_reward,
        result.pair,
        result.pip_value.get(),
        result.lot_size,
    );

    // Take-profit ladder
    report.push_str("\n## Take Profit Targets\n\n");
    report.push_str("| Target | Pips | Profit ($) | % of Account | % of Goal |\n");
    report.push_str("|--------|------|------------|--------------|-----------|\n");
    for (i, level) in result.take_profits.levels().iter().enumerate() {
        report.push_str(&format!(
            "| TP{} | {:.1} | ${:.2} | {:.2}% | {:.2}% |\n",
            i + 1,
            level.pips,
            level.dollar_value,
            level.pct_of_account,
            level.pct_of_goal
        ));
    }

    let estimated = result.take_profits.tp1.dollar_value;
    if result.goal_met {
        report.push_str(&format!(
            "\nSetup meets your {} target (${:.2})\n",
            result.goal_type.label().to_lowercase(),
            estimated
        ));
    } else {
        report.push_str(&format!(
            "\nTrade won't meet your goal. Estimated: ${:.2}\n",
            estimated
        ));
    }

    // Simulator
    let sim = &result.simulation;
    report.push_str(&format!(
        "\n## Risk to Reward Simulator\n\n\
- Risk: `${:.2}` (max `${:.2}`)\n\
- R:R: `1:{:.2}`\n\
- Reward: `${:.2}`\n",
        sim.sim_risk, sim.sim_risk_max, sim.sim_risk_to_reward, sim.sim_reward
    ));

    // Trade management advisory
    report.push_str("\n## Trailing Stop Loss & Breakeven\n\n");
    report.push_str(&format!("> {EXECUTION_DISCLAIMER}\n"));
    for note in result.management.notes() {
        report.push_str(&format!("\n- {note}"));
    }
    if !result.management.is_empty() {
        report.push('\n');
    }

    // Multi-trade breakdown
    let mt = &result.multi_trade;
    report.push_str("\n## Multi-Trade Breakdown\n\n");
    report.push_str(&format!("Remaining % at TP3: {}%\n\n", mt.tp3.pct));
    report.push_str("| TP | % of Position | Lots | Profit ($) |\n");
    report.push_str("|----|---------------|------|------------|\n");
    for (i, leg) in mt.legs().iter().enumerate() {
        report.push_str(&format!(
            "| TP{} | {}% | {} | ${:.2} |\n",
            i + 1,
            leg.pct,
            leg.lots,
            leg.profit
        ));
    }
    report.push_str(&format!(
        "| **Total** | 100% | {} | **${:.2}** |\n",
        result.lot_size, mt.total_profit
    ));
    if mt.total_goal_met {
        report.push_str(&format!(
            "\nMulti-trade plan meets your profit target (${:.2})\n",
            result.target_profit
        ));
    } else {
        report.push_str(&format!(
            "\nMulti-trade plan falls short. Earns only ${:.2}\n",
            mt.total_profit
        ));
    }

    // Drawdown recovery
    report.push_str("\n## Drawdown Recovery Planner\n\n");
    match &result.recovery {
        Some(recovery) => {
            report.push_str(&format!(
                "- Drawdown: `${:.2}`\n\
- R:R: `1:{:.2}`\n\
- Per Win: `${:.2}`\n\
- Needed: `{} wins`\n",
                recovery.drawdown_amount,
                sim.sim_risk_to_reward,
                recovery.per_trade_profit,
                recovery.trades_needed
            ));
            report.push_str("\n### Recovery Progress\n\n");
            report.push_str("| Trade # | Profit ($) | Remaining Drawdown ($) |\n");
            report.push_str("|---------|------------|------------------------|\n");
            for step in recovery.schedule.iter() {
                report.push_str(&format!(
                    "| {} | ${:.2} | ${:.2} |\n",
                    step.trade_index, step.cumulative_profit, step.remaining_drawdown
                ));
            }
            report.push_str(&format!("\n{}\n", recovery.outlook.message()));
        }
        None => report.push_str("Enter your drawdown to get recovery steps.\n"),
    }

    report
}

/// Supported pairs grouped by category, with pip values.
pub fn render_pairs() -> String {
    let categories = [
        PairCategory::Major,
        PairCategory::GbpCross,
        PairCategory::EurCross,
        PairCategory::JpyCross,
        PairCategory::OtherCross,
        PairCategory::MetalOrCrypto,
    ];

    let mut out = String::new();
    for category in categories {
        out.push_str(&format!("{}\n", category.label()));
        for pair in PairSymbol::sorted()
            .into_iter()
            .filter(|p| p.category() == category)
        {
            out.push_str(&format!("  {:<8} {:>5}\n", pair.as_str(), pair.pip_value().get()));
        }
    }
    out
}
