//! Role checks. Every admin command requires one of the configured role sets.

use crate::{bot::Context, errors::Result};

async fn author_roles(ctx: Context<'_>) -> Option<Vec<u64>> {
    let member = ctx.author_member().await?;
    Some(member.roles.iter().map(|role| role.get()).collect::<Vec<u64>>())
}

/// Passes when the invoker holds a root role.
pub async fn is_root(ctx: Context<'_>) -> Result<bool> {
    let roles = author_roles(ctx).await.unwrap_or_default();
    Ok(ctx.data().settings.is_root(&roles))
}

/// Passes when the invoker holds a root or admin role.
pub async fn is_root_or_admin(ctx: Context<'_>) -> Result<bool> {
    let roles = author_roles(ctx).await.unwrap_or_default();
    Ok(ctx.data().settings.is_root_or_admin(&roles))
}
