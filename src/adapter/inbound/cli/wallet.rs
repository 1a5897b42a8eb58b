//! Balance commands: `balance` and `position`.

use serde_json::json;

use super::command::TokenArg;
use super::{format, output};
use crate::domain::id::TokenId;
use crate::error::Result;
use crate::infrastructure::context::ClientContext;

/// Collateral (USDC) balance of the funder address.
pub async fn balance(ctx: &ClientContext) -> Result<()> {
    let wallet = ctx.wallet()?;
    let collateral = wallet.collateral().await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "balance",
            "collateral": collateral,
        }));
        return Ok(());
    }

    output::section("Balance");
    output::field("USDC", format::usd(collateral));
    Ok(())
}

/// Outcome-token shares held for one token.
pub async fn position(ctx: &ClientContext, args: &TokenArg) -> Result<()> {
    let token_id = TokenId::new(args.token.trim());
    let wallet = ctx.wallet()?;
    let shares = wallet.position(&token_id).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "position",
            "token_id": token_id,
            "shares": shares,
        }));
        return Ok(());
    }

    output::section(&format!("Position {}", output::highlight(&token_id)));
    output::field("Shares", shares.normalize());
    Ok(())
}
