use thiserror::Error;

use crate::diagnostics::codes::*;
use crate::diagnostics::Diagnostic;
use crate::symbols::SymbolKind;
use crate::utils::Span;

/// 语义错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("you can't divide by 0.")]
    DivisionByZero { target: String, span: Span },

    #[error("'%' cannot be followed by zero.")]
    ModuloByZero { target: String, span: Span },

    #[error("variable '{name}' not defined.")]
    UndefinedVariable { name: String, span: Span },

    #[error("cursor '{name}' is used before it is created.")]
    CursorNotCreated { name: String, span: Span },

    #[error("'{name}' is a {}, but a {} is expected here.", found.describe(), expected.describe())]
    KindMismatch {
        name: String,
        expected: SymbolKind,
        found: SymbolKind,
        span: Span,
    },

    #[error("cursor '{name}' is already created.")]
    CursorRedefined { name: String, span: Span },

    #[error("the value assigned to '{target}' does not fit into a 64-bit integer.")]
    ArithmeticOverflow { target: String, span: Span },
}

impl SemanticError {
    pub fn span(&self) -> Span {
        match self {
            SemanticError::DivisionByZero { span, .. }
            | SemanticError::ModuloByZero { span, .. }
            | SemanticError::UndefinedVariable { span, .. }
            | SemanticError::CursorNotCreated { span, .. }
            | SemanticError::KindMismatch { span, .. }
            | SemanticError::CursorRedefined { span, .. }
            | SemanticError::ArithmeticOverflow { span, .. } => *span,
        }
    }

    pub fn code(&self) -> &'static ErrorCode {
        match self {
            SemanticError::DivisionByZero { .. } => &E0200_DIVISION_BY_ZERO,
            SemanticError::ModuloByZero { .. } => &E0201_MODULO_BY_ZERO,
            SemanticError::UndefinedVariable { .. } | SemanticError::CursorNotCreated { .. } => {
                &E0202_UNDEFINED_VARIABLE
            }
            SemanticError::KindMismatch { .. } => &E0203_KIND_MISMATCH,
            SemanticError::CursorRedefined { .. } => &E0204_CURSOR_REDEFINED,
            SemanticError::ArithmeticOverflow { .. } => &E0205_ARITHMETIC_OVERFLOW,
        }
    }
}

impl From<SemanticError> for Diagnostic {
    fn from(error: SemanticError) -> Self {
        let diagnostic = Diagnostic::new(error.code(), error.span()).with_message(error.to_string());
        match &error {
            SemanticError::DivisionByZero { target, .. } | SemanticError::ModuloByZero { target, .. } => {
                diagnostic.with_note(format!("'{target}' keeps its previous value."))
            }
            SemanticError::UndefinedVariable { name, .. } => {
                diagnostic.with_note(format!("Please define '{name}' as a numeric variable."))
            }
            SemanticError::CursorNotCreated { name, .. } => diagnostic.with_note(format!(
                "Create it first with '{name} = create cursor at (<x>, <y>) with (...)'."
            )),
            SemanticError::KindMismatch { .. } => {
                diagnostic.with_note("A name is either a cursor or a numeric variable, never both.")
            }
            SemanticError::CursorRedefined { .. } | SemanticError::ArithmeticOverflow { .. } => diagnostic,
        }
    }
}
