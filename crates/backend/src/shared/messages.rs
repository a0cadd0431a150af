//! Каталог сообщений: ключ -> шаблон.
//!
//! Тексты плиток и заголовков досок разрешаются один раз при построении
//! таксономии, дальше доска работает с готовыми строками.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    /// Текст по ключу. Неизвестный ключ возвращается как есть.
    pub fn resolve(&self, key: &str) -> String {
        match self.templates.get(key) {
            Some(template) => template.clone(),
            None => {
                tracing::warn!("Message key not found in catalog: {}", key);
                key.to_string()
            }
        }
    }

    /// Текст по ключу с подстановкой `{name}`
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.resolve(key), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }
}
