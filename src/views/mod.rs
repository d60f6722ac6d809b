//! views
//!
//! Терминальные экраны. Каждый экран сам ходит в API и держит состояние
//! только на время своей жизни - никакого кеширования, каждый переход
//! перезагружает данные заново. Ошибка любой операции печатается и
//! остаётся локальной для экрана, процесс не падает.

pub mod account;
pub mod admin;
pub mod booking;
pub mod catalog;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use validator::ValidationErrors;

/// Обёртка над stdin/stdout для диалогов. Одна на процесс -
/// создаётся в main и передаётся экранам по &mut.
pub struct Term {
    reader: BufReader<Stdin>,
}

impl Term {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
        }
    }

    /// Печатает приглашение и читает строку (обрезая пробелы).
    pub async fn prompt(&mut self, label: &str) -> anyhow::Result<String> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(label.as_bytes()).await?;
        stdout.flush().await?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await?;
        if read == 0 {
            anyhow::bail!("stdin closed");
        }
        Ok(line.trim().to_string())
    }

    /// Пустой ввод превращает в None.
    pub async fn prompt_optional(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        let value = self.prompt(label).await?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    pub async fn confirm(&mut self, label: &str) -> anyhow::Result<bool> {
        let answer = self.prompt(&format!("{} [y/N]: ", label)).await?;
        Ok(matches!(answer.as_str(), "y" | "Y" | "yes"))
    }
}

impl Default for Term {
    fn default() -> Self {
        Self::new()
    }
}

/// Денежный формат: целые суммы без копеек, дробные - с двумя знаками.
pub fn money(amount: f64) -> String {
    if (amount.fract()).abs() < f64::EPSILON {
        format!("₹{}", amount as i64)
    } else {
        format!("₹{:.2}", amount)
    }
}

/// Разворачивает ошибки validator в плоский список "поле: сообщение".
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, kinds) in errors.errors() {
        collect_messages(field.as_ref(), kinds, &mut messages);
    }
    messages.sort();
    messages
}

fn collect_messages(field: &str, kind: &validator::ValidationErrorsKind, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;
    match kind {
        ValidationErrorsKind::Field(errors) => {
            for error in errors {
                let text = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.push(format!("{}: {}", field, text));
            }
        }
        ValidationErrorsKind::Struct(nested) => {
            for (inner, kinds) in nested.errors() {
                collect_messages(&format!("{}.{}", field, inner), kinds, out);
            }
        }
        ValidationErrorsKind::List(items) => {
            for (index, nested) in items {
                for (inner, kinds) in nested.errors() {
                    collect_messages(&format!("{}[{}].{}", field, index, inner), kinds, out);
                }
            }
        }
    }
}
