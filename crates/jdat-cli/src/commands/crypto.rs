use jdat_core::JdatError;

use crate::app::{prompt_new_password, prompt_password, AppContext};
use crate::cli::CryptArgs;
use crate::ui::{print, receipt};

use super::resolve_index;

pub fn handle_encrypt(ctx: &AppContext, args: &CryptArgs) -> anyhow::Result<()> {
    let mut file = ctx.load_document()?;
    let index = resolve_index(&file, &args.target)?;
    let block = &file.blocks()[index];
    let link = block.link().to_string();
    // Fail before prompting
    if block.is_encrypted() {
        return Err(JdatError::AlreadyEncrypted(link).into());
    }

    let password = prompt_new_password(ctx.interactive())?;
    file.encrypt_at(index, &password)?;
    ctx.save_document(&mut file)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        print(&ui_ctx, &receipt(&ui_ctx, "Encrypted block", &[("Link", &link)]));
    }
    Ok(())
}

pub fn handle_decrypt(ctx: &AppContext, args: &CryptArgs) -> anyhow::Result<()> {
    let mut file = ctx.load_document()?;
    let index = resolve_index(&file, &args.target)?;
    let block = &file.blocks()[index];
    let link = block.link().to_string();
    if !block.is_encrypted() {
        return Err(JdatError::NotEncrypted(link).into());
    }

    let password = prompt_password(ctx.interactive())?;
    file.decrypt_at(index, &password)?;
    ctx.save_document(&mut file)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        print(&ui_ctx, &receipt(&ui_ctx, "Decrypted block", &[("Link", &link)]));
    }
    Ok(())
}
