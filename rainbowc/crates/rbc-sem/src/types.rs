//! Symbol model: types, scope kinds, and symbol records.

use std::fmt;

use rbc_par::TypeName;

/// Rainbow's nominal types, plus the `Indefinido` bottom used when a type
/// cannot be determined. `Indefinido` suppresses follow-on diagnostics so a
/// single unknown does not cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolType {
    Numero,
    Texto,
    Logico,
    Lista,
    Indefinido,
}

impl SymbolType {
    /// The uppercase name used in reports and messages.
    pub fn name(self) -> &'static str {
        match self {
            SymbolType::Numero => "NUMERO",
            SymbolType::Texto => "TEXTO",
            SymbolType::Logico => "LOGICO",
            SymbolType::Lista => "LISTA",
            SymbolType::Indefinido => "INDEFINIDO",
        }
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TypeName> for SymbolType {
    fn from(ty: TypeName) -> Self {
        match ty {
            TypeName::Numero => SymbolType::Numero,
            TypeName::Texto => SymbolType::Texto,
            TypeName::Logico => SymbolType::Logico,
            TypeName::Lista => SymbolType::Lista,
        }
    }
}

/// Scope kind of a frame in the symbol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Bloco,
    Laco,
}

impl ScopeKind {
    pub fn name(self) -> &'static str {
        match self {
            ScopeKind::Global => "GLOBAL",
            ScopeKind::Bloco => "BLOCO",
            ScopeKind::Laco => "LACO",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the symbol table.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: SymbolType,
    pub scope: ScopeKind,
    /// Declaration position.
    pub line: u32,
    pub column: u32,
    pub declared: bool,
    pub used: bool,
    /// Source text of the initializing literal, when an implicit
    /// declaration took its type from one.
    pub initial: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(SymbolType::Numero.name(), "NUMERO");
        assert_eq!(SymbolType::Indefinido.name(), "INDEFINIDO");
    }

    #[test]
    fn test_from_type_name() {
        assert_eq!(SymbolType::from(TypeName::Logico), SymbolType::Logico);
        assert_eq!(SymbolType::from(TypeName::Lista), SymbolType::Lista);
    }

    #[test]
    fn test_scope_names() {
        assert_eq!(ScopeKind::Global.name(), "GLOBAL");
        assert_eq!(ScopeKind::Laco.name(), "LACO");
    }
}
