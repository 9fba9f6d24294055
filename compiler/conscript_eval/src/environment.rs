//! Variable environments.
//!
//! The caller supplies variables either as an owned map or as an
//! on-demand lookup callable (the sentinel protocol of the original
//! surface maps onto `Option`). Function invocation extends the
//! environment with a parameter frame; frames are immutable and chained
//! by `Arc`, so invocations of the same literal never share mutable
//! state and compiled conscriptions stay re-entrant.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::options::EvalSettings;
use crate::value::Value;

/// Root variable source supplied by the caller.
#[derive(Clone)]
pub enum VarProvider {
    /// Name → value mapping; lookup by exact key.
    Map(Arc<FxHashMap<String, Value>>),
    /// On-demand lookup. `None` means "not a variable".
    Lookup(Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>),
}

impl VarProvider {
    fn get(&self, name: &str) -> Option<Value> {
        match self {
            VarProvider::Map(map) => map.get(name).cloned(),
            VarProvider::Lookup(f) => f(name),
        }
    }
}

impl fmt::Debug for VarProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarProvider::Map(map) => f.debug_tuple("Map").field(&map.len()).finish(),
            VarProvider::Lookup(_) => f.write_str("Lookup(..)"),
        }
    }
}

/// One parameter frame pushed by a function invocation.
#[derive(Debug)]
struct Frame {
    bindings: FxHashMap<String, Value>,
    parent: Option<Arc<Frame>>,
}

/// An immutable chain of parameter frames over a root provider.
#[derive(Clone, Debug)]
pub struct ScopeChain {
    frame: Option<Arc<Frame>>,
    root: VarProvider,
}

impl ScopeChain {
    /// Chain with no frames over the given provider.
    pub fn new(root: VarProvider) -> Self {
        ScopeChain { frame: None, root }
    }

    /// Resolve a name: innermost frame first, then outward, then the
    /// root provider. `None` routes to the `unknowns_are` policy.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut frame = self.frame.as_ref();
        while let Some(f) = frame {
            if let Some(v) = f.bindings.get(name) {
                return Some(v.clone());
            }
            frame = f.parent.as_ref();
        }
        self.root.get(name)
    }

    /// Derive a child chain with one more frame on top.
    #[must_use]
    pub fn push_frame(&self, bindings: FxHashMap<String, Value>) -> ScopeChain {
        ScopeChain {
            frame: Some(Arc::new(Frame {
                bindings,
                parent: self.frame.clone(),
            })),
            root: self.root.clone(),
        }
    }
}

/// The caller-facing variable environment builder.
#[derive(Clone, Debug)]
pub struct Vars {
    provider: VarProvider,
}

impl Vars {
    /// Empty environment.
    pub fn new() -> Self {
        Vars {
            provider: VarProvider::Map(Arc::new(FxHashMap::default())),
        }
    }

    /// Builder-style insertion. Only valid on map-backed environments;
    /// a lookup-backed environment ignores insertions.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        if let VarProvider::Map(map) = &mut self.provider {
            Arc::make_mut(map).insert(name.into(), value.into());
        }
        self
    }

    /// Environment backed by an on-demand lookup callable.
    pub fn lookup_with(f: impl Fn(&str) -> Option<Value> + Send + Sync + 'static) -> Self {
        Vars {
            provider: VarProvider::Lookup(Arc::new(f)),
        }
    }

    /// The underlying provider, for building an evaluation context.
    pub fn provider(&self) -> VarProvider {
        self.provider.clone()
    }
}

impl Default for Vars {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Into<String>, V: Into<Value>, const N: usize> From<[(S, V); N]> for Vars {
    fn from(entries: [(S, V); N]) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Vars {
            provider: VarProvider::Map(Arc::new(map)),
        }
    }
}

/// Everything a thunk needs at evaluation time: the scope chain, the
/// per-exec default-left, and the compile-time settings.
#[derive(Clone, Debug)]
pub struct EvalContext {
    /// Variable resolution chain.
    pub scope: ScopeChain,
    /// The value standing in for omitted left operands.
    pub default_left: Option<Value>,
    /// Safe modes, unknowns policy, debug sink, type predicates.
    pub settings: Arc<EvalSettings>,
}

impl EvalContext {
    /// Context over a variable environment with default settings.
    pub fn new(vars: &Vars, settings: Arc<EvalSettings>) -> Self {
        EvalContext {
            scope: ScopeChain::new(vars.provider()),
            default_left: None,
            settings,
        }
    }

    /// Same context with a default-left installed.
    #[must_use]
    pub fn with_default_left(mut self, value: Option<Value>) -> Self {
        self.default_left = value;
        self
    }

    /// Same context evaluating under a different scope chain — used when
    /// invoking function literals, which run under their captured chain
    /// plus a parameter frame.
    #[must_use]
    pub fn with_scope(&self, scope: ScopeChain) -> Self {
        EvalContext {
            scope,
            default_left: self.default_left.clone(),
            settings: Arc::clone(&self.settings),
        }
    }
}
