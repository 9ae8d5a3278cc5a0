use jdat_core::{Block, BlockKind, BlockSummary};

use crate::app::{display_path, prompt_password, AppContext};
use crate::cli::{FindArgs, GetArgs, ListArgs, ShowArgs};
use crate::errors::CliError;
use crate::output::{block_json, summaries_json};
use crate::ui::theme::LOCKED;
use crate::ui::{
    badge, blank_line, divider, header, hint, kv, print, simple_table, table, Badge, Column,
    OutputMode, UiContext,
};

use super::{resolve_block, resolve_index};

const LIST_COLUMNS: [Column; 4] = [
    Column::new("LINK"),
    Column::new("NAME"),
    Column::new("KIND"),
    Column::new(""),
];

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let file = ctx.load_document()?;
    let summaries = file.list_blocks();
    let ui_ctx = ctx.ui_context(args.json);

    if ui_ctx.mode.is_json() {
        println!("{}", summaries_json(&summaries)?);
        return Ok(());
    }

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        print(&ui_ctx, &header(&ui_ctx, "list", display_path(&file).as_deref()));
        blank_line(&ui_ctx);
    }
    if summaries.is_empty() {
        if !ctx.quiet() {
            print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "No blocks"));
            print(&ui_ctx, &hint(&ui_ctx, "jdat add --name <name> --link <link>"));
        }
        return Ok(());
    }
    print_summaries(&ui_ctx, &summaries);
    Ok(())
}

pub fn handle_find(ctx: &AppContext, args: &FindArgs) -> anyhow::Result<()> {
    let file = ctx.load_document()?;
    let summaries: Vec<BlockSummary> = file
        .find(&args.query)
        .into_iter()
        .map(Block::summary)
        .collect();
    let ui_ctx = ctx.ui_context(args.json);

    if ui_ctx.mode.is_json() {
        println!("{}", summaries_json(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        return Err(CliError::not_found(
            format!("No blocks match '{}'", args.query),
            "Run `jdat list` to see all blocks.",
        )
        .into());
    }
    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        print(&ui_ctx, &header(&ui_ctx, &format!("find \"{}\"", args.query), None));
        blank_line(&ui_ctx);
    }
    print_summaries(&ui_ctx, &summaries);
    Ok(())
}

fn print_summaries(ui_ctx: &UiContext, summaries: &[BlockSummary]) {
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|summary| match ui_ctx.mode {
            OutputMode::Pretty => vec![
                summary.link.clone(),
                summary.name.clone(),
                summary.kind.to_string(),
                if summary.encrypted {
                    format!("{} encrypted", LOCKED.get(ui_ctx.unicode))
                } else {
                    String::new()
                },
            ],
            _ => vec![
                summary.link.clone(),
                summary.name.clone(),
                format!("t:{}", summary.kind.code()),
                if summary.encrypted { "encrypted" } else { "clear" }.to_string(),
            ],
        })
        .collect();
    print(ui_ctx, &simple_table(ui_ctx, &LIST_COLUMNS, &rows));
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let mut file = ctx.load_document()?;
    let index = resolve_index(&file, &args.target)?;
    if args.decrypt && file.blocks()[index].is_encrypted() {
        let password = prompt_password(ctx.interactive())?;
        // In memory only; the document is not saved.
        file.decrypt_at(index, &password)?;
    }
    let block = &file.blocks()[index];
    let ui_ctx = ctx.ui_context(args.json);

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&block_json(block))?);
        return Ok(());
    }

    if !ctx.quiet() {
        if ui_ctx.mode.is_pretty() {
            print(&ui_ctx, &header(&ui_ctx, "show", display_path(&file).as_deref()));
            blank_line(&ui_ctx);
        }
        print(&ui_ctx, &kv(&ui_ctx, "Name", block.name()));
        print(&ui_ctx, &kv(&ui_ctx, "Link", block.link()));
        print(&ui_ctx, &kv(&ui_ctx, "Kind", &block.kind().to_string()));
        print(
            &ui_ctx,
            &kv(&ui_ctx, "Encrypted", if block.is_encrypted() { "yes" } else { "no" }),
        );
        blank_line(&ui_ctx);
        print(&ui_ctx, &divider(&ui_ctx));
        blank_line(&ui_ctx);
    }

    if block.is_encrypted() {
        if ui_ctx.mode.is_pretty() {
            print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "Content is encrypted"));
            print(
                &ui_ctx,
                &hint(&ui_ctx, &format!("jdat show {} --decrypt", block.link())),
            );
        } else {
            println!("{}", block.canonical_content());
        }
        return Ok(());
    }

    match block.kind() {
        BlockKind::Structured if ui_ctx.mode.is_pretty() => {
            let rows: Vec<Vec<String>> = block
                .structured()?
                .iter()
                .map(|(k, v)| vec![k.clone(), v.clone()])
                .collect();
            print(
                &ui_ctx,
                &table(&ui_ctx, &[Column::new("KEY"), Column::new("VALUE")], &rows),
            );
        }
        _ => println!("{}", block.canonical_content()),
    }
    Ok(())
}

pub fn handle_get(ctx: &AppContext, args: &GetArgs) -> anyhow::Result<()> {
    let file = ctx.load_document()?;
    let block = resolve_block(&file, &args.target)?;

    let value = match args.default.as_deref() {
        Some(default) => block.get_or(&args.key, default)?,
        None => block.get(&args.key)?.ok_or_else(|| {
            CliError::not_found(
                format!("Key '{}' not found in block '{}'", args.key, block.link()),
                format!("Run `jdat show {}` to see its keys.", block.link()),
            )
        })?,
    };
    println!("{}", value);
    Ok(())
}
