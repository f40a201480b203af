use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

/// Asks for the post URL. `None` when the answer is blank.
pub fn ask_for_url() -> Result<Option<String>> {
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("input cohost.org URL here")
        .allow_empty(true)
        .interact_text()?;
    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}
