//! Scoped symbol table.
//!
//! A stack of insertion-ordered frames. The bottom frame is the global
//! scope and never pops; each block or loop body pushes a frame on top.
//! Lookup walks the stack top-down; declaration touches only the top
//! frame, so shadowing an outer name is silent while redeclaring within
//! the same frame fails.
//!
//! Popped frames migrate their symbols into a history list so
//! unused-variable diagnostics survive scope exit.

use indexmap::IndexMap;

use crate::types::{ScopeKind, Symbol, SymbolType};

/// Symbol table with hierarchical scopes plus history.
pub struct SymbolTable {
    frames: Vec<IndexMap<String, Symbol>>,
    kinds: Vec<ScopeKind>,
    history: Vec<Symbol>,
}

impl SymbolTable {
    /// Creates a table holding only the global frame.
    pub fn new() -> Self {
        Self {
            frames: vec![IndexMap::new()],
            kinds: vec![ScopeKind::Global],
            history: Vec::new(),
        }
    }

    /// Pushes a new frame of the given kind.
    pub fn enter_scope(&mut self, kind: ScopeKind) {
        self.frames.push(IndexMap::new());
        self.kinds.push(kind);
    }

    /// Pops the top frame, moving its symbols into the history.
    ///
    /// The global frame never pops.
    pub fn exit_scope(&mut self) {
        if self.frames.len() > 1 {
            let frame = self.frames.pop().unwrap_or_default();
            self.kinds.pop();
            self.history.extend(frame.into_values());
        }
    }

    /// Declares `name` in the top frame.
    ///
    /// Returns false when the name already exists in that frame.
    pub fn declare(&mut self, name: &str, ty: SymbolType, line: u32, column: u32) -> bool {
        let scope = *self.kinds.last().unwrap_or(&ScopeKind::Global);
        let Some(frame) = self.frames.last_mut() else {
            return false;
        };

        if frame.contains_key(name) {
            return false;
        }

        frame.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                ty,
                scope,
                line,
                column,
                declared: true,
                used: false,
                initial: None,
            },
        );
        true
    }

    /// Finds `name`, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Marks `name` as used. Returns false when it is not in scope.
    pub fn mark_used(&mut self, name: &str) -> bool {
        for frame in self.frames.iter_mut().rev() {
            if let Some(symbol) = frame.get_mut(name) {
                symbol.used = true;
                return true;
            }
        }
        false
    }

    /// Records the initializing literal of the innermost binding of `name`.
    pub fn set_initial(&mut self, name: &str, value: impl Into<String>) {
        for frame in self.frames.iter_mut().rev() {
            if let Some(symbol) = frame.get_mut(name) {
                symbol.initial = Some(value.into());
                return;
            }
        }
    }

    /// Declared-but-never-used symbols: live frames first, then history.
    pub fn unused_symbols(&self) -> Vec<&Symbol> {
        self.frames
            .iter()
            .flat_map(|frame| frame.values())
            .chain(self.history.iter())
            .filter(|s| s.declared && !s.used)
            .collect()
    }

    /// Every symbol, live frames first, then history.
    pub fn all_symbols(&self) -> Vec<Symbol> {
        self.frames
            .iter()
            .flat_map(|frame| frame.values())
            .chain(self.history.iter())
            .cloned()
            .collect()
    }

    /// Number of frames currently on the stack.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_frame_always_present() {
        let mut table = SymbolTable::new();
        assert_eq!(table.depth(), 1);
        table.exit_scope();
        assert_eq!(table.depth(), 1);
    }

    #[test]
    fn test_declare_and_lookup() {
        let mut table = SymbolTable::new();
        assert!(table.declare("#a", SymbolType::Numero, 2, 1));
        let symbol = table.lookup("#a").unwrap();
        assert_eq!(symbol.ty, SymbolType::Numero);
        assert_eq!(symbol.scope, ScopeKind::Global);
        assert!(symbol.declared);
        assert!(!symbol.used);
    }

    #[test]
    fn test_redeclaration_in_same_frame_fails() {
        let mut table = SymbolTable::new();
        assert!(table.declare("#a", SymbolType::Numero, 2, 1));
        assert!(!table.declare("#a", SymbolType::Texto, 3, 1));
    }

    #[test]
    fn test_shadowing_in_inner_frame_is_silent() {
        let mut table = SymbolTable::new();
        table.declare("#a", SymbolType::Numero, 2, 1);
        table.enter_scope(ScopeKind::Bloco);
        assert!(table.declare("#a", SymbolType::Texto, 4, 1));
        assert_eq!(table.lookup("#a").unwrap().ty, SymbolType::Texto);
        table.exit_scope();
        assert_eq!(table.lookup("#a").unwrap().ty, SymbolType::Numero);
    }

    #[test]
    fn test_lookup_walks_stack() {
        let mut table = SymbolTable::new();
        table.declare("#a", SymbolType::Numero, 1, 1);
        table.enter_scope(ScopeKind::Laco);
        assert!(table.lookup("#a").is_some());
        assert!(table.mark_used("#a"));
    }

    #[test]
    fn test_popped_symbols_survive_in_history() {
        let mut table = SymbolTable::new();
        table.enter_scope(ScopeKind::Bloco);
        table.declare("#interna", SymbolType::Texto, 5, 1);
        table.exit_scope();
        assert!(table.lookup("#interna").is_none());
        let unused = table.unused_symbols();
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].name, "#interna");
    }

    #[test]
    fn test_unused_reports_live_frames_before_history() {
        let mut table = SymbolTable::new();
        table.declare("#global", SymbolType::Numero, 1, 1);
        table.enter_scope(ScopeKind::Bloco);
        table.declare("#interna", SymbolType::Numero, 2, 1);
        table.exit_scope();
        let names: Vec<&str> = table.unused_symbols().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["#global", "#interna"]);
    }

    #[test]
    fn test_mark_used_targets_innermost() {
        let mut table = SymbolTable::new();
        table.declare("#a", SymbolType::Numero, 1, 1);
        table.enter_scope(ScopeKind::Bloco);
        table.declare("#a", SymbolType::Texto, 2, 1);
        table.mark_used("#a");
        table.exit_scope();
        // Outer binding stays unused.
        assert_eq!(table.unused_symbols().len(), 1);
    }

    #[test]
    fn test_set_initial() {
        let mut table = SymbolTable::new();
        table.declare("#a", SymbolType::Numero, 1, 1);
        table.set_initial("#a", "10");
        assert_eq!(table.lookup("#a").unwrap().initial.as_deref(), Some("10"));
    }
}
