use jdat_core::JdatFile;

use crate::app::{normalize_new_path, AppContext};
use crate::cli::NewArgs;
use crate::errors::CliError;
use crate::ui::{hint, print, receipt};

pub fn handle_new(ctx: &AppContext, args: &NewArgs) -> anyhow::Result<()> {
    let path = normalize_new_path(&args.path);
    if path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    let mut file = JdatFile::with_path(path.clone());
    ctx.save_document(&mut file)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let shown = path.display().to_string();
        print(&ui_ctx, &receipt(&ui_ctx, "Created document", &[("Path", &shown)]));
        print(
            &ui_ctx,
            &hint(
                &ui_ctx,
                &format!("jdat -f {} add --name <name> --link <link>", shown),
            ),
        );
    }
    Ok(())
}
