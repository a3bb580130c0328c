// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Fully instantiated models.

use crate::index::{Index, Value};

/// Members of a set, depending on whether the set is indexed.
#[derive(Debug, Clone, PartialEq)]
pub enum SetMembers {
    /// Ordered members of a plain set. Each member is a `dimen`-tuple.
    Scalar(Vec<Index>),
    /// Ordered members per index of an indexed set.
    Indexed(Vec<(Index, Vec<Index>)>),
}

/// A declared set with its bound members.
#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub name: String,
    pub doc: Option<String>,
    /// Number of values per member.
    pub dimen: usize,
    /// Names of the sets this set is indexed by.
    pub index: Vec<String>,
    pub members: SetMembers,
}

impl Set {
    pub fn is_indexed(&self) -> bool {
        matches!(self.members, SetMembers::Indexed(_))
    }

    /// Members of a plain set, `None` for indexed sets.
    pub fn scalar_members(&self) -> Option<&[Index]> {
        match &self.members {
            SetMembers::Scalar(members) => Some(members),
            SetMembers::Indexed(_) => None,
        }
    }
}

/// A declared parameter with its bound values.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub doc: Option<String>,
    pub index: Vec<String>,
    pub default: Option<Value>,
    /// Entries in domain order. With a default this covers the whole domain,
    /// otherwise only the keys that were given values.
    pub entries: Vec<(Index, Value)>,
}

impl Param {
    pub fn get(&self, index: &[Value]) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_slice() == index)
            .map(|(_, value)| value)
    }
}

/// One entry of a decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VarEntry {
    pub index: Index,
    /// Value reported by the solver, once a solution has been loaded.
    pub value: Option<f64>,
}

/// A declared decision variable over its full domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    pub name: String,
    pub doc: Option<String>,
    pub index: Vec<String>,
    pub entries: Vec<VarEntry>,
}

impl Var {
    pub fn get(&self, index: &[Value]) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.index.as_slice() == index)
            .and_then(|entry| entry.value)
    }
}

/// A model with all sets and parameters bound to concrete data.
///
/// Components keep their declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    pub name: String,
    pub doc: Option<String>,
    pub(crate) sets: Vec<Set>,
    pub(crate) params: Vec<Param>,
    pub(crate) vars: Vec<Var>,
}

impl ModelInstance {
    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn vars(&self) -> &[Var] {
        &self.vars
    }

    pub fn set(&self, name: &str) -> Option<&Set> {
        self.sets.iter().find(|s| s.name == name)
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn var(&self, name: &str) -> Option<&Var> {
        self.vars.iter().find(|v| v.name == name)
    }
}
