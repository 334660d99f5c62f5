//! Paginated embed presenter.
//!
//! Shows `(title, body)` field entries a page at a time with previous/next
//! buttons. Only the invoker can flip pages; the buttons are removed once the
//! collector times out.

use crate::{
    bot::Context,
    core::listing::{ENTRIES_PER_PAGE, Entry},
    errors::Result,
};
use poise::serenity_prelude as serenity;
use std::time::Duration;

/// How long the page buttons stay usable after the last press
const PAGE_TIMEOUT: Duration = Duration::from_secs(180);

/// Number of pages needed for `item_count` entries.
#[must_use]
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1)).max(1)
}

/// Start/end indices of the zero-based `page`.
#[must_use]
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let per_page = per_page.max(1);
    let start = page.saturating_mul(per_page).min(total_items);
    let end = (start + per_page).min(total_items);
    (start, end)
}

/// Page after `current`, wrapping to the first.
const fn next_page(current: usize, total: usize) -> usize {
    if current + 1 >= total { 0 } else { current + 1 }
}

/// Page before `current`, wrapping to the last.
const fn previous_page(current: usize, total: usize) -> usize {
    if current == 0 { total.saturating_sub(1) } else { current - 1 }
}

/// Embed pages built from field entries.
#[derive(Debug, Clone)]
pub struct FieldPages {
    entries: Vec<Entry>,
    description: String,
    per_page: usize,
    author: Option<(String, String)>,
}

impl FieldPages {
    /// Pages of [`ENTRIES_PER_PAGE`] entries under `description`.
    #[must_use]
    pub fn new(entries: Vec<Entry>, description: impl Into<String>) -> Self {
        Self {
            entries,
            description: description.into(),
            per_page: ENTRIES_PER_PAGE,
            author: None,
        }
    }

    /// Shows `name` and `icon_url` in the embed's author slot.
    #[must_use]
    pub fn author(mut self, name: impl Into<String>, icon_url: impl Into<String>) -> Self {
        self.author = Some((name.into(), icon_url.into()));
        self
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        total_pages(self.entries.len(), self.per_page)
    }

    /// Fields shown on `page`, each on its own row.
    fn page_fields(&self, page: usize) -> Vec<(String, String, bool)> {
        let (start, end) = page_window(self.entries.len(), self.per_page, page);
        self.entries[start..end]
            .iter()
            .map(|(name, value)| (name.clone(), value.clone(), false))
            .collect()
    }

    fn embed(&self, page: usize) -> serenity::CreateEmbed {
        let total = self.page_count();

        let mut embed = serenity::CreateEmbed::new()
            .description(&self.description)
            .colour(serenity::Colour::BLURPLE)
            .fields(self.page_fields(page));
        if total > 1 {
            embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
                "Page {}/{total}",
                page + 1
            )));
        }
        if let Some((name, icon_url)) = &self.author {
            embed = embed.author(serenity::CreateEmbedAuthor::new(name).icon_url(icon_url));
        }
        embed
    }

    /// Sends the first page and serves button presses until the timeout.
    pub async fn start(self, ctx: Context<'_>, ephemeral: bool) -> Result<()> {
        let total = self.page_count();
        let ctx_id = ctx.id();
        let prev_id = format!("{ctx_id}prev");
        let next_id = format!("{ctx_id}next");

        let mut reply = poise::CreateReply::default()
            .embed(self.embed(0))
            .ephemeral(ephemeral);
        if total > 1 {
            reply = reply.components(vec![serenity::CreateActionRow::Buttons(vec![
                serenity::CreateButton::new(&prev_id).emoji('◀'),
                serenity::CreateButton::new(&next_id).emoji('▶'),
            ])]);
        }
        let handle = ctx.send(reply).await?;
        if total <= 1 {
            return Ok(());
        }

        let author_id = ctx.author().id;
        let mut current = 0;
        while let Some(press) = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .author_id(author_id)
            .filter(move |press| press.data.custom_id.starts_with(&ctx_id.to_string()))
            .timeout(PAGE_TIMEOUT)
            .await
        {
            current = if press.data.custom_id == next_id {
                next_page(current, total)
            } else if press.data.custom_id == prev_id {
                previous_page(current, total)
            } else {
                continue;
            };

            press
                .create_response(
                    ctx.serenity_context(),
                    serenity::CreateInteractionResponse::UpdateMessage(
                        serenity::CreateInteractionResponseMessage::new().embed(self.embed(current)),
                    ),
                )
                .await?;
        }

        handle
            .edit(
                ctx,
                poise::CreateReply::default()
                    .embed(self.embed(current))
                    .components(Vec::new()),
            )
            .await?;
        Ok(())
    }
}
