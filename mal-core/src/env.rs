// mal-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for function bindings with lexical scoping.
//!
//! Frames live in an arena owned by [`Env`] and refer to their parent by
//! index. Frames are pushed and popped in stack order, so the arena always
//! holds exactly the chain from the root to the current frame.

use std::collections::HashMap;

use mal_parser::{NativeFn, Symbol};
use tracing::trace;

use crate::builtins::register_builtins;

/// Index of a frame in an [`Env`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(usize);

#[derive(Debug, Default)]
struct Frame {
    bindings: HashMap<Symbol, NativeFn>,
    parent: Option<FrameId>,
}

/// A chain of binding frames.
///
/// # Examples
///
/// ```
/// use mal_core::Env;
/// use mal_parser::Symbol;
///
/// let mut env = Env::with_stdlib();
/// let plus = Symbol::new("+");
/// assert!(env.get(&plus).is_some());
///
/// // Child frames see their parents' bindings
/// env.push_frame();
/// assert!(env.get(&plus).is_some());
/// env.pop_frame();
///
/// assert!(env.get(&Symbol::new("undefined")).is_none());
/// ```
#[derive(Debug)]
pub struct Env {
    frames: Vec<Frame>,
    current: FrameId,
}

impl Env {
    /// Create an environment holding a single empty root frame.
    pub fn new() -> Self {
        Env {
            frames: vec![Frame::default()],
            current: FrameId(0),
        }
    }

    /// Create an environment whose root frame holds the standard library.
    pub fn with_stdlib() -> Self {
        let mut env = Env::new();
        register_builtins(&mut env);
        env
    }

    #[must_use]
    pub fn root(&self) -> FrameId {
        FrameId(0)
    }

    #[must_use]
    pub fn current(&self) -> FrameId {
        self.current
    }

    /// Number of frames between the current frame and the root, inclusive.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Open a child of the current frame and make it current.
    pub fn push_frame(&mut self) -> FrameId {
        let id = FrameId(self.frames.len());
        self.frames.push(Frame {
            bindings: HashMap::new(),
            parent: Some(self.current),
        });
        self.current = id;
        trace!(depth = self.frames.len(), "pushed frame");
        id
    }

    /// Discard the current frame and return to its parent.
    ///
    /// Returns the new current frame, or `None` (leaving the environment
    /// unchanged) when already at the root.
    pub fn pop_frame(&mut self) -> Option<FrameId> {
        let parent = self.frames[self.current.0].parent?;
        self.frames.truncate(self.current.0);
        self.current = parent;
        trace!(depth = self.frames.len(), "popped frame");
        Some(parent)
    }

    /// Look `sym` up from the current frame outwards.
    #[must_use]
    pub fn get(&self, sym: &Symbol) -> Option<&NativeFn> {
        self.get_from(self.current, sym)
    }

    /// Look `sym` up starting at `frame`. Unknown frames yield `None`.
    #[must_use]
    pub fn get_from(&self, frame: FrameId, sym: &Symbol) -> Option<&NativeFn> {
        let mut next = Some(frame);
        while let Some(FrameId(index)) = next {
            let frame = self.frames.get(index)?;
            if let Some(func) = frame.bindings.get(sym) {
                return Some(func);
            }
            next = frame.parent;
        }
        None
    }

    #[must_use]
    pub fn contains(&self, sym: &Symbol) -> bool {
        self.get(sym).is_some()
    }

    /// Bind `sym` in the current frame, replacing any existing local binding.
    /// Bindings in enclosing frames are shadowed, never changed.
    pub fn set(&mut self, sym: Symbol, func: NativeFn) {
        trace!(symbol = %sym, "bind");
        self.frames[self.current.0].bindings.insert(sym, func);
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
