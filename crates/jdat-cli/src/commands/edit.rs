use jdat_core::BlockKind;

use crate::app::AppContext;
use crate::cli::{AddArgs, CommentArgs, EditArgs, RemoveArgs, SetArgs};
use crate::errors::CliError;
use crate::ui::{print, receipt};

use super::{resolve_block_mut, resolve_index};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let kind = BlockKind::from(args.kind);
    if !args.set.is_empty() && !kind.is_structured() {
        return Err(CliError::invalid_input("--set requires --kind data").into());
    }
    let pairs = args
        .set
        .iter()
        .map(|pair| parse_key_value(pair))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut file = ctx.load_document()?;
    let block = file.add_block(
        &args.name,
        &args.link,
        kind,
        args.content.as_deref().unwrap_or_default(),
    )?;
    for (key, value) in pairs {
        block.set(key, value)?;
    }
    ctx.save_document(&mut file)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let kind_text = kind.to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Added block",
                &[("Link", &args.link), ("Name", &args.name), ("Kind", &kind_text)],
            ),
        );
    }
    Ok(())
}

pub fn handle_set(ctx: &AppContext, args: &SetArgs) -> anyhow::Result<()> {
    let mut file = ctx.load_document()?;
    let block = resolve_block_mut(&mut file, &args.target)?;
    block.set(&args.key, &args.value)?;
    let link = block.link().to_string();
    ctx.save_document(&mut file)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Updated block", &[("Link", &link), ("Key", &args.key)]),
        );
    }
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let mut file = ctx.load_document()?;
    let index = resolve_index(&file, &args.target)?;
    let block = &file.blocks()[index];
    let link = block.link().to_string();
    if block.is_encrypted() {
        return Err(CliError::invalid_input(format!(
            "Block '{}' is encrypted; run `jdat decrypt {}` first",
            link, link
        ))
        .into());
    }
    file.set_content_at(index, &args.content)?;
    ctx.save_document(&mut file)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        print(&ui_ctx, &receipt(&ui_ctx, "Replaced content", &[("Link", &link)]));
    }
    Ok(())
}

pub fn handle_remove(ctx: &AppContext, args: &RemoveArgs) -> anyhow::Result<()> {
    let mut file = ctx.load_document()?;
    if !file.remove_block(&args.link) {
        return Err(CliError::not_found(
            format!("No block with link '{}'", args.link),
            "Run `jdat list` to see block links.",
        )
        .into());
    }
    ctx.save_document(&mut file)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        print(&ui_ctx, &receipt(&ui_ctx, "Removed block", &[("Link", &args.link)]));
    }
    Ok(())
}

pub fn handle_comment(ctx: &AppContext, args: &CommentArgs) -> anyhow::Result<()> {
    let mut file = ctx.load_document()?;
    file.add_comment(&args.text)?;
    ctx.save_document(&mut file)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let count = file.comments().len().to_string();
        print(&ui_ctx, &receipt(&ui_ctx, "Added comment", &[("Comments", &count)]));
    }
    Ok(())
}

/// Split a `KEY=VALUE` argument at the first `=`.
fn parse_key_value(pair: &str) -> anyhow::Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key, value)),
        _ => Err(CliError::invalid_input(format!(
            "Invalid --set '{}' (expected KEY=VALUE)",
            pair
        ))
        .into()),
    }
}
