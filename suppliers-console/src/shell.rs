//! Line-oriented interactive form. The form persists between commands, so
//! a `retrieve` followed by `set category x` and `update` behaves like
//! editing the page.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::api::SupplierApi;
use crate::form::{FormField, SupplierForm};

const HELP: &str = "\
Commands:
  set <field> <value>   field is one of id, name, category, available, status
  create | retrieve | update | delete | search | clear
  show                  print the form
  help                  this text
  quit                  leave the shell
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Set(FormField, String),
    Create,
    Retrieve,
    Update,
    Delete,
    Search,
    Clear,
    Show,
    Help,
    Quit,
}

impl ShellCommand {
    /// `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err("usage: set <field> <value>".to_string());
                }
                ShellCommand::Set(field.parse()?, value.to_string())
            }
            "create" => ShellCommand::Create,
            "retrieve" | "get" => ShellCommand::Retrieve,
            "update" => ShellCommand::Update,
            "delete" => ShellCommand::Delete,
            "search" => ShellCommand::Search,
            "clear" => ShellCommand::Clear,
            "show" => ShellCommand::Show,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("unknown command '{}' (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

/// Applies one command to the form. Returns `false` once the user quits.
pub async fn execute(command: ShellCommand, form: &mut SupplierForm, api: &dyn SupplierApi) -> bool {
    let result = match command {
        ShellCommand::Set(field, value) => {
            form.set(field, value);
            Ok(())
        }
        ShellCommand::Create => form.create(api).await,
        ShellCommand::Retrieve => form.retrieve(api).await,
        ShellCommand::Update => form.update(api).await,
        ShellCommand::Delete => form.delete(api).await,
        ShellCommand::Search => form.search(api).await,
        ShellCommand::Clear => {
            form.clear();
            Ok(())
        }
        ShellCommand::Show | ShellCommand::Help => Ok(()),
        ShellCommand::Quit => return false,
    };
    if let Err(err) = result {
        debug!("Shell command failed: {}", err);
    }
    true
}

pub async fn run<R, W>(
    api: &dyn SupplierApi,
    form: &mut SupplierForm,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output.write_all(b"suppliers> ").await?;
    output.flush().await?;

    while let Some(line) = lines.next_line().await? {
        match ShellCommand::parse(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Help)) => output.write_all(HELP.as_bytes()).await?,
            Ok(Some(command)) => {
                let prints_form = !matches!(command, ShellCommand::Set(..));
                if !execute(command, form, api).await {
                    break;
                }
                if prints_form {
                    output.write_all(form.to_string().as_bytes()).await?;
                }
            }
            Err(msg) => {
                output.write_all(format!("error: {}\n", msg).as_bytes()).await?;
            }
        }
        output.write_all(b"suppliers> ").await?;
        output.flush().await?;
    }

    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use suppliers_core::{Supplier, SupplierPayload, SupplierQuery};

    struct DownApi;

    fn unavailable() -> ApiError {
        ApiError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: Some("Server error!".to_string()),
        }
    }

    #[async_trait]
    impl SupplierApi for DownApi {
        async fn create(&self, _: &SupplierPayload) -> Result<Supplier, ApiError> {
            Err(unavailable())
        }
        async fn retrieve(&self, _: &str) -> Result<Supplier, ApiError> {
            Err(unavailable())
        }
        async fn update(&self, _: &str, _: &SupplierPayload) -> Result<Supplier, ApiError> {
            Err(unavailable())
        }
        async fn delete(&self, _: &str) -> Result<(), ApiError> {
            Err(unavailable())
        }
        async fn search(&self, _: &SupplierQuery) -> Result<Vec<Supplier>, ApiError> {
            Err(unavailable())
        }
    }

    #[tokio::test]
    async fn test_failed_command_keeps_shell_running() {
        let mut form = SupplierForm::new();
        form.set(FormField::Id, "7");

        assert!(execute(ShellCommand::Retrieve, &mut form, &DownApi).await);
        assert_eq!(form.flash, "Server error!");
        assert!(!execute(ShellCommand::Quit, &mut form, &DownApi).await);
    }

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        assert_eq!(
            ShellCommand::parse("set name  Acme & Sons ").unwrap(),
            Some(ShellCommand::Set(FormField::Name, "Acme & Sons".to_string()))
        );
    }

    #[test]
    fn test_parse_set_without_value_clears_field() {
        assert_eq!(
            ShellCommand::parse("set available").unwrap(),
            Some(ShellCommand::Set(FormField::Available, String::new()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        assert!(ShellCommand::parse("launch").is_err());
        assert!(ShellCommand::parse("set colour red").is_err());
        assert!(ShellCommand::parse("set").is_err());
    }

    #[test]
    fn test_parse_blank_and_aliases() {
        assert_eq!(ShellCommand::parse("   ").unwrap(), None);
        assert_eq!(ShellCommand::parse("GET").unwrap(), Some(ShellCommand::Retrieve));
        assert_eq!(ShellCommand::parse("exit").unwrap(), Some(ShellCommand::Quit));
    }
}
