use console::Style;

use crate::errors::Result;
use crate::models::params::DEFAULT_LP_PERCENTAGE;
use crate::models::LaunchParams;

/// Validate launch parameters without opening a session, printing every
/// violation the way the bot would report them.
pub fn validate_params(
    name: &str,
    symbol: &str,
    supply: u64,
    eth_liquidity: f64,
    lp_percentage: Option<u8>,
) -> Result<()> {
    let ok_style = Style::new().green();
    let err_style = Style::new().red();

    let params = LaunchParams::new(
        name,
        symbol,
        supply,
        eth_liquidity,
        lp_percentage.unwrap_or(DEFAULT_LP_PERCENTAGE),
    );
    let violations = params.validate();

    if violations.is_empty() {
        println!(
            "{}",
            ok_style.apply_to(format!(
                "Parameters OK: {} ({}) supply {} with {} ETH, {}% to LP ({} tokens)",
                params.name,
                params.symbol,
                params.supply,
                params.eth_liquidity,
                params.lp_percentage,
                params.lp_token_amount(),
            ))
        );
    } else {
        println!("{}", err_style.apply_to("Invalid launch parameters:").bold());
        for violation in &violations {
            println!("  - {}", violation);
        }
        std::process::exit(1);
    }

    Ok(())
}
