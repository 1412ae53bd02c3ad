//! Validation messages surfaced by the delivery form.
//!
//! These must match the rendered text byte-for-byte; the form is Russian-only.

/// Shown under the city field for a city outside the delivery area.
pub const CITY_UNSUPPORTED: &str = "Доставка в выбранный город недоступна";

/// Shown under any required field left empty.
pub const REQUIRED_FIELD: &str = "Поле обязательно для заполнения";

/// Shown under the date field when the date is earlier than the minimum lead time.
pub const DATE_TOO_SOON: &str = "Заказ на выбранную дату невозможен";

/// Shown under the date field for a malformed or empty date.
pub const DATE_INVALID: &str = "Неверно введена дата";

/// Shown under the name field for anything but Cyrillic letters, spaces and hyphens.
pub const NAME_INVALID: &str =
    "Имя и Фамилия указаные неверно. Допустимы только русские буквы, пробелы и дефисы.";

/// Shown under the phone field for anything but +7 and ten digits.
pub const PHONE_INVALID: &str =
    "Телефон указан неверно. Должно быть 11 цифр, например, +79012345678.";
