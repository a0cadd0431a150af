//! Утилиты форматирования чисел для таблиц

/// Целое число с разделителем тысяч (пробел)
///
/// # Примеры
///
/// ```
/// # use frontend::shared::components::table::number_format::format_number_int;
/// let formatted = format_number_int(1234567);
/// assert_eq!(formatted, "1 234 567");
/// ```
pub fn format_number_int(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(' ');
        }
        result.push(c);
    }
    if value < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Сумма в вонах: `₩1 234 500`
pub fn format_krw(value: i64) -> String {
    if value < 0 {
        format!("-₩{}", format_number_int(value).trim_start_matches('-'))
    } else {
        format!("₩{}", format_number_int(value))
    }
}
