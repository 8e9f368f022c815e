use trellis_shell::{ModuleList, ShellConfig};

/// Feature modules shipped with the binary, in registration order.
pub fn default_modules(config: &ShellConfig) -> eyre::Result<ModuleList> {
    Ok(ModuleList::new()
        .with(extension_hacker_news::Extension)
        .with(extension_comments::Extension)
        .with(extension_likes::Extension::new(config.users_url()?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_registers_first() {
        let modules = default_modules(&ShellConfig::default()).unwrap();
        assert_eq!(modules.names(), vec!["hacker_news", "comments", "likes"]);
    }
}
