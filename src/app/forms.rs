//! Modal form state and value coercion.
//!
//! Form fields are kept as raw text while the user types and only converted when
//! submitted. Numbers are coerced the way a browser's `parseFloat` would: the longest
//! numeric prefix wins and anything without one becomes NaN, which the server then
//! rejects with its own message.

use crate::domain::{MovementKind, MovementRequest, NewProduct, StockboardError};

/// Message shown when a movement quantity is missing, zero or negative.
pub const INVALID_QUANTITY_MESSAGE: &str = "Quantidade deve ser maior que zero";

/// Editing behaviour shared by the modal forms.
///
/// Implementors expose their fields by index; focus movement and text editing are
/// provided on top of that.
pub trait Form {
    /// Labels of the editable fields, in focus order.
    fn labels(&self) -> &'static [&'static str];

    fn field(&self, index: usize) -> Option<&str>;

    fn field_mut(&mut self, index: usize) -> Option<&mut String>;

    fn focus(&self) -> usize;

    fn set_focus(&mut self, index: usize);

    fn next_field(&mut self) {
        let count = self.labels().len();
        self.set_focus((self.focus() + 1) % count);
    }

    fn prev_field(&mut self) {
        let count = self.labels().len();
        self.set_focus((self.focus() + count - 1) % count);
    }

    fn insert_char(&mut self, c: char) {
        let focus = self.focus();
        if let Some(field) = self.field_mut(focus) {
            field.push(c);
        }
    }

    fn backspace(&mut self) {
        let focus = self.focus();
        if let Some(field) = self.field_mut(focus) {
            field.pop();
        }
    }
}

/// The add-product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub descricao: String,
    pub unidade: String,
    pub fornecimento: String,
    pub estoque: String,
    pub estoque_minimo: String,
    focus: usize,
}

impl Default for ProductForm {
    fn default() -> Self {
        let defaults = NewProduct::default();
        Self {
            descricao: defaults.descricao,
            unidade: defaults.unidade,
            fornecimento: format_default(defaults.fornecimento),
            estoque: format_default(defaults.estoque),
            estoque_minimo: format_default(defaults.estoque_minimo),
            focus: 0,
        }
    }
}

fn format_default(value: f64) -> String {
    crate::domain::product::format_quantity(value)
}

impl ProductForm {
    /// Builds the request payload. No bounds are checked; unparseable numbers become NaN.
    #[must_use]
    pub fn to_payload(&self) -> NewProduct {
        NewProduct {
            descricao: self.descricao.clone(),
            unidade: self.unidade.clone(),
            fornecimento: parse_float(&self.fornecimento),
            estoque: parse_float(&self.estoque),
            estoque_minimo: parse_float(&self.estoque_minimo),
        }
    }
}

impl Form for ProductForm {
    fn labels(&self) -> &'static [&'static str] {
        &["Descrição", "Unidade", "Fornecimento", "Estoque", "Estoque mínimo"]
    }

    fn field(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.descricao),
            1 => Some(&self.unidade),
            2 => Some(&self.fornecimento),
            3 => Some(&self.estoque),
            4 => Some(&self.estoque_minimo),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.descricao),
            1 => Some(&mut self.unidade),
            2 => Some(&mut self.fornecimento),
            3 => Some(&mut self.estoque),
            4 => Some(&mut self.estoque_minimo),
            _ => None,
        }
    }

    fn focus(&self) -> usize {
        self.focus
    }

    fn set_focus(&mut self, index: usize) {
        self.focus = index;
    }
}

/// The stock movement form, bound to one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementForm {
    pub product_id: Option<i64>,
    pub description: String,
    pub kind: MovementKind,
    pub quantidade: String,
    pub observacao: String,
    focus: usize,
}

impl Default for MovementForm {
    fn default() -> Self {
        Self {
            product_id: None,
            description: String::new(),
            kind: MovementKind::Entry,
            quantidade: String::new(),
            observacao: String::new(),
            focus: 0,
        }
    }
}

impl MovementForm {
    /// A fresh form for recording `kind` against the given product.
    #[must_use]
    pub fn for_product(product_id: i64, description: &str, kind: MovementKind) -> Self {
        Self {
            product_id: Some(product_id),
            description: description.to_string(),
            kind,
            ..Self::default()
        }
    }

    /// Validates the form into a movement request.
    ///
    /// # Errors
    ///
    /// Returns [`StockboardError::Validation`] when the quantity is not a number
    /// greater than zero, or when the form is not bound to a product.
    pub fn to_request(&self) -> crate::Result<MovementRequest> {
        let quantidade = parse_float(&self.quantidade);
        // NaN fails this comparison too
        if !(quantidade > 0.0) {
            return Err(StockboardError::Validation(INVALID_QUANTITY_MESSAGE.to_string()));
        }
        let product_id = self
            .product_id
            .ok_or_else(|| StockboardError::Validation("Nenhum produto selecionado".to_string()))?;

        Ok(MovementRequest {
            product_id,
            kind: self.kind,
            quantidade,
            observacao: self.observacao.clone(),
        })
    }
}

impl Form for MovementForm {
    fn labels(&self) -> &'static [&'static str] {
        &["Quantidade", "Observação"]
    }

    fn field(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.quantidade),
            1 => Some(&self.observacao),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.quantidade),
            1 => Some(&mut self.observacao),
            _ => None,
        }
    }

    fn focus(&self) -> usize {
        self.focus
    }

    fn set_focus(&mut self, index: usize) {
        self.focus = index;
    }
}

/// Parses the longest numeric prefix of `input`, ignoring leading whitespace.
///
/// Returns NaN when there is no numeric prefix at all.
///
/// # Examples
///
/// ```
/// use stockboard::app::forms::parse_float;
///
/// assert_eq!(parse_float(" 12.5kg"), 12.5);
/// assert_eq!(parse_float("-3e2x"), -300.0);
/// assert_eq!(parse_float(".5"), 0.5);
/// assert!(parse_float("abc").is_nan());
/// assert!(parse_float("").is_nan());
/// ```
#[must_use]
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let is_digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let mut digits = 0;
    while is_digit(end) {
        end += 1;
        digits += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while is_digit(frac_end) {
            frac_end += 1;
            digits += 1;
        }
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        if is_digit(exp_end) {
            while is_digit(exp_end) {
                exp_end += 1;
            }
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn product_form_starts_from_defaults() {
        let form = ProductForm::default();

        assert_eq!(form.unidade, "UNIDADE");
        assert_eq!(form.fornecimento, "0");
        assert_eq!(form.estoque, "0");
        assert_eq!(form.estoque_minimo, "5");
        assert_eq!(form.to_payload(), NewProduct::default());
    }

    #[test]
    fn unparseable_supply_becomes_nan() {
        let form = ProductForm {
            descricao: "Caneta".to_string(),
            fornecimento: "abc".to_string(),
            ..ProductForm::default()
        };

        let payload = form.to_payload();

        assert!(payload.fornecimento.is_nan());
        assert_eq!(payload.estoque, 0.0);
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = ProductForm::default();

        form.insert_char('A');
        form.next_field();
        form.backspace();
        form.prev_field();
        form.prev_field();
        form.insert_char('9');

        assert_eq!(form.descricao, "A");
        assert_eq!(form.unidade, "UNIDAD");
        assert_eq!(form.estoque_minimo, "59");
    }

    #[test]
    fn movement_rejects_non_positive_quantities() {
        for raw in ["0", "-1", "", "abc", "-0.5"] {
            let form = MovementForm {
                quantidade: raw.to_string(),
                ..MovementForm::for_product(1, "Arroz", MovementKind::Exit)
            };

            let err = form.to_request().unwrap_err();

            assert_eq!(err.to_string(), INVALID_QUANTITY_MESSAGE, "input {raw:?}");
        }
    }

    #[test]
    fn movement_builds_request_for_bound_product() {
        let mut form = MovementForm::for_product(4, "Feijão", MovementKind::Entry);
        form.quantidade = "2,5".to_string();
        form.observacao = "compra".to_string();

        let request = form.to_request().unwrap();

        assert_eq!(request.product_id, 4);
        assert_eq!(request.quantidade, 2.0);
        assert_eq!(request.kind, MovementKind::Entry);
    }

    #[test]
    fn parse_float_prefix_rules() {
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("1e+"), 1.0);
        assert_eq!(parse_float("+7"), 7.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float("-").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("e5").is_nan());
    }

    proptest! {
        #[test]
        fn parse_float_reads_rendered_numbers(value in -1.0e12f64..1.0e12, suffix in "[a-zA-Z ,]{0,4}") {
            let rendered = format!("{value}{suffix}");

            prop_assert_eq!(parse_float(&rendered), value);
        }

        #[test]
        fn parse_float_without_leading_number_is_nan(text in "[a-zA-Z,][a-zA-Z0-9 ]{0,8}") {
            prop_assume!(!text.starts_with("Infinity"));

            prop_assert!(parse_float(&text).is_nan());
        }
    }
}
