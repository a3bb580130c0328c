// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Declarative model definitions and their instantiation.
//!
//! A definition names the model and declares its components in order:
//!
//! ```toml
//! name = "transport"
//! doc = "Transportation problem"
//!
//! [[sets]]
//! name = "plants"
//! members = ["seattle", "san-diego"]
//!
//! [[params]]
//! name = "capacity"
//! index = ["plants"]
//! default = 0
//!
//! [[vars]]
//! name = "ship"
//! index = ["plants"]
//! ```
//!
//! Inline members and values make a definition self-contained; a `.dat`
//! file passed at instantiation replaces whatever it mentions.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::dat::{self, DataCommand, Entry, ParamBody};
use crate::error::{ModelError, Result};
use crate::index::{Index, Value, canonical, label};
use crate::instance::{ModelInstance, Param, Set, SetMembers, Var, VarEntry};

fn one() -> usize {
    1
}

/// A set member written inline: a bare value or a tuple.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Member {
    Tuple(Vec<Value>),
    Atom(Value),
}

/// Declaration of a set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetDef {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default = "one")]
    pub dimen: usize,
    /// Index sets; a non-empty list declares an indexed set.
    #[serde(default)]
    pub index: Vec<String>,
    #[serde(default)]
    pub members: Vec<Member>,
}

/// One inline parameter value.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamValueDef {
    #[serde(default)]
    pub index: Vec<Value>,
    pub value: Value,
}

/// Declaration of a parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDef {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub index: Vec<String>,
    #[serde(default)]
    pub default: Option<Value>,
    /// Value of a scalar parameter.
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub values: Vec<ParamValueDef>,
}

/// Declaration of a decision variable.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VarDef {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub index: Vec<String>,
}

/// A model declaration, independent of concrete data.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDefinition {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub sets: Vec<SetDef>,
    #[serde(default)]
    pub params: Vec<ParamDef>,
    #[serde(default)]
    pub vars: Vec<VarDef>,
}

impl ModelDefinition {
    pub fn from_toml(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Build an instance, applying the commands of a parsed data file.
    pub fn instantiate_with(&self, commands: &[DataCommand]) -> Result<ModelInstance> {
        self.check_unique_names()?;

        let sets = self.bind_sets(commands)?;
        let domains = SetDomains::new(&sets);
        for set in &sets {
            if let Some(members) = set.scalar_members() {
                ensure_unambiguous(&set.name, members, false)?;
            }
            if let SetMembers::Indexed(entries) = &set.members {
                let keys: Vec<&Index> = entries.iter().map(|(key, _)| key).collect();
                let domain = domains.domain(&set.name, &set.index)?;
                for key in keys {
                    check_in_domain(&set.name, &domain, key)?;
                }
            }
        }

        let params = self.bind_params(commands, &domains)?;
        let vars = self
            .vars
            .iter()
            .map(|def| {
                let entries = domains
                    .domain(&def.name, &def.index)?
                    .into_iter()
                    .map(|index| VarEntry { index, value: None })
                    .collect();
                Ok(Var {
                    name: def.name.clone(),
                    doc: def.doc.clone(),
                    index: def.index.clone(),
                    entries,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "instantiated model {} with {} sets, {} params, {} vars",
            self.name,
            sets.len(),
            params.len(),
            vars.len()
        );
        Ok(ModelInstance {
            name: self.name.clone(),
            doc: self.doc.clone(),
            sets,
            params,
            vars,
        })
    }

    /// Build an instance from inline data plus an optional data file.
    pub fn instantiate_from(&self, data: Option<&Path>) -> Result<ModelInstance> {
        let commands = match data {
            Some(path) => {
                let input =
                    fs::read_to_string(path).map_err(|e| ModelError::read_file(path, e))?;
                debug!("parsing data file {}", path.display());
                dat::parse(&input)?
            }
            None => Vec::new(),
        };
        self.instantiate_with(&commands)
    }

    fn check_unique_names(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let names = self
            .sets
            .iter()
            .map(|s| &s.name)
            .chain(self.params.iter().map(|p| &p.name))
            .chain(self.vars.iter().map(|v| &v.name));
        for name in names {
            if !seen.insert(name.as_str()) {
                return Err(ModelError::DuplicateComponent(name.clone()));
            }
        }
        Ok(())
    }

    fn set_def(&self, name: &str) -> Result<&SetDef> {
        self.sets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ModelError::UnknownComponent {
                kind: "set",
                name: name.to_owned(),
            })
    }

    fn param_def(&self, name: &str) -> Result<&ParamDef> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ModelError::UnknownComponent {
                kind: "param",
                name: name.to_owned(),
            })
    }

    /// Arity of a component's index: the summed dimensions of its index sets.
    fn arity(&self, component: &str, index: &[String]) -> Result<usize> {
        index
            .iter()
            .map(|set| {
                self.sets
                    .iter()
                    .find(|s| &s.name == set)
                    .map(|s| s.dimen)
                    .ok_or_else(|| ModelError::UnknownIndexSet {
                        component: component.to_owned(),
                        set: set.clone(),
                    })
            })
            .sum()
    }

    fn bind_sets(&self, commands: &[DataCommand]) -> Result<Vec<Set>> {
        let mut scalar: HashMap<&str, Vec<Index>> = HashMap::new();
        let mut indexed: HashMap<&str, Vec<(Index, Vec<Index>)>> = HashMap::new();

        for def in &self.sets {
            if def.dimen == 0 {
                return Err(ModelError::Arity {
                    component: def.name.clone(),
                    expected: 1,
                    found: 0,
                });
            }
            let members = def
                .members
                .iter()
                .map(|member| match member {
                    Member::Atom(value) => vec![value.clone()],
                    Member::Tuple(values) => values.clone(),
                })
                .map(|member| {
                    if member.len() == def.dimen {
                        Ok(member)
                    } else {
                        Err(ModelError::Arity {
                            component: def.name.clone(),
                            expected: def.dimen,
                            found: member.len(),
                        })
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            if def.index.is_empty() {
                scalar.insert(def.name.as_str(), dedup(members));
            } else {
                // Inline members of an indexed set have no key to attach to.
                if !members.is_empty() {
                    return Err(ModelError::Arity {
                        component: def.name.clone(),
                        expected: self.arity(&def.name, &def.index)?,
                        found: 0,
                    });
                }
                indexed.insert(def.name.as_str(), Vec::new());
            }
        }

        for command in commands {
            let DataCommand::Set {
                name,
                index,
                members,
            } = command
            else {
                continue;
            };
            let def = self.set_def(name)?;
            let grouped = group(name, members, def.dimen)?;
            match index {
                None if def.index.is_empty() => {
                    scalar.insert(def.name.as_str(), dedup(grouped));
                }
                Some(key) if !def.index.is_empty() => {
                    let expected = self.arity(name, &def.index)?;
                    if key.len() != expected {
                        return Err(ModelError::Arity {
                            component: name.clone(),
                            expected,
                            found: key.len(),
                        });
                    }
                    let entries = indexed.entry(def.name.as_str()).or_default();
                    entries.retain(|(existing, _)| existing != key);
                    entries.push((key.clone(), dedup(grouped)));
                }
                None => {
                    return Err(ModelError::Arity {
                        component: name.clone(),
                        expected: self.arity(name, &def.index)?,
                        found: 0,
                    });
                }
                Some(key) => {
                    return Err(ModelError::Arity {
                        component: name.clone(),
                        expected: 0,
                        found: key.len(),
                    });
                }
            }
        }

        Ok(self
            .sets
            .iter()
            .map(|def| {
                let members = if def.index.is_empty() {
                    SetMembers::Scalar(scalar.remove(def.name.as_str()).unwrap_or_default())
                } else {
                    SetMembers::Indexed(indexed.remove(def.name.as_str()).unwrap_or_default())
                };
                Set {
                    name: def.name.clone(),
                    doc: def.doc.clone(),
                    dimen: def.dimen,
                    index: def.index.clone(),
                    members,
                }
            })
            .collect())
    }

    fn bind_params(&self, commands: &[DataCommand], domains: &SetDomains<'_>) -> Result<Vec<Param>> {
        let mut values: HashMap<&str, HashMap<Index, Value>> = HashMap::new();
        let mut defaults: HashMap<&str, Option<Value>> = HashMap::new();

        for def in &self.params {
            let arity = self.arity(&def.name, &def.index)?;
            let mut inline = HashMap::new();
            if let Some(value) = &def.value {
                if arity != 0 {
                    return Err(ModelError::Arity {
                        component: def.name.clone(),
                        expected: arity,
                        found: 0,
                    });
                }
                inline.insert(Vec::new(), value.clone());
            }
            for entry in &def.values {
                if entry.index.len() != arity {
                    return Err(ModelError::Arity {
                        component: def.name.clone(),
                        expected: arity,
                        found: entry.index.len(),
                    });
                }
                inline.insert(entry.index.clone(), entry.value.clone());
            }
            values.insert(def.name.as_str(), inline);
            defaults.insert(def.name.as_str(), def.default.clone());
        }

        for command in commands {
            match command {
                DataCommand::Set { .. } => {}
                DataCommand::Param {
                    name,
                    default,
                    body,
                } => {
                    let def = self.param_def(name)?;
                    let arity = self.arity(name, &def.index)?;
                    if let Some(default) = default {
                        defaults.insert(def.name.as_str(), Some(default.clone()));
                    }
                    let slot = values.entry(def.name.as_str()).or_default();
                    for (key, value) in param_entries(name, arity, body)? {
                        slot.insert(key, value);
                    }
                }
                DataCommand::Params { names, rows } => {
                    let defs = names
                        .iter()
                        .map(|name| self.param_def(name))
                        .collect::<Result<Vec<_>>>()?;
                    let Some((first, rest)) = defs.split_first() else {
                        return Err(ModelError::NoParams);
                    };
                    let arity = self.arity(&first.name, &first.index)?;
                    for def in rest {
                        let other = self.arity(&def.name, &def.index)?;
                        if other != arity {
                            return Err(ModelError::Arity {
                                component: def.name.clone(),
                                expected: arity,
                                found: other,
                            });
                        }
                    }
                    let width = arity + defs.len();
                    if rows.len() % width != 0 {
                        return Err(ModelError::Arity {
                            component: names.join(","),
                            expected: width,
                            found: rows.len() % width,
                        });
                    }
                    for row in rows.chunks(width) {
                        let key = key_values(&first.name, &row[..arity])?;
                        for (def, cell) in defs.iter().zip(&row[arity..]) {
                            if let Entry::Value(value) = cell {
                                values
                                    .entry(def.name.as_str())
                                    .or_default()
                                    .insert(key.clone(), value.clone());
                            }
                        }
                    }
                }
            }
        }

        self.params
            .iter()
            .map(|def| {
                let domain = domains.domain(&def.name, &def.index)?;
                let mut given = values.remove(def.name.as_str()).unwrap_or_default();
                let default = defaults.remove(def.name.as_str()).flatten();

                let allowed: HashSet<&Index> = domain.iter().collect();
                for key in given.keys() {
                    if !allowed.contains(key) {
                        return Err(ModelError::OutOfDomain {
                            component: def.name.clone(),
                            index: canonical(key),
                        });
                    }
                }

                let entries: Vec<(Index, Value)> = domain
                    .into_iter()
                    .filter_map(|key| {
                        let value = given.remove(&key).or_else(|| default.clone())?;
                        Some((key, value))
                    })
                    .collect();

                if def.index.is_empty() && entries.is_empty() {
                    return Err(ModelError::MissingValue(def.name.clone()));
                }

                Ok(Param {
                    name: def.name.clone(),
                    doc: def.doc.clone(),
                    index: def.index.clone(),
                    default,
                    entries,
                })
            })
            .collect()
    }
}

/// Members of the bound plain sets, used to expand component domains.
struct SetDomains<'a> {
    members: HashMap<&'a str, &'a [Index]>,
    indexed: HashSet<&'a str>,
}

impl<'a> SetDomains<'a> {
    fn new(sets: &'a [Set]) -> Self {
        let mut members = HashMap::new();
        let mut indexed = HashSet::new();
        for set in sets {
            match set.scalar_members() {
                Some(m) => {
                    members.insert(set.name.as_str(), m);
                }
                None => {
                    indexed.insert(set.name.as_str());
                }
            }
        }
        Self { members, indexed }
    }

    /// Cartesian product of the index sets, in member order.
    fn domain(&self, component: &str, index: &[String]) -> Result<Vec<Index>> {
        let mut domain: Vec<Index> = vec![Vec::new()];
        for set in index {
            if self.indexed.contains(set.as_str()) {
                return Err(ModelError::IndexedIndexSet {
                    component: component.to_owned(),
                    set: set.clone(),
                });
            }
            let members = self
                .members
                .get(set.as_str())
                .ok_or_else(|| ModelError::UnknownIndexSet {
                    component: component.to_owned(),
                    set: set.clone(),
                })?;
            domain = domain
                .iter()
                .flat_map(|prefix| {
                    members.iter().map(move |member| {
                        let mut key = prefix.clone();
                        key.extend(member.iter().cloned());
                        key
                    })
                })
                .collect();
        }
        ensure_unambiguous(component, &domain, true)?;
        Ok(domain)
    }
}

/// Reject keys that would collide once stored as `index_str`, or as solver
/// labels when `labels` is set.
fn ensure_unambiguous(component: &str, keys: &[Index], labels: bool) -> Result<()> {
    let mut stored = HashSet::new();
    let mut reported = HashSet::new();
    for key in keys {
        let index = canonical(key);
        let clash = !stored.insert(index.clone())
            || (labels && !reported.insert(label(component, key)));
        if clash {
            return Err(ModelError::AmbiguousIndex {
                component: component.to_owned(),
                index,
            });
        }
    }
    Ok(())
}

fn check_in_domain(component: &str, domain: &[Index], key: &Index) -> Result<()> {
    if domain.contains(key) {
        Ok(())
    } else {
        Err(ModelError::OutOfDomain {
            component: component.to_owned(),
            index: canonical(key),
        })
    }
}

/// Drop repeated members, keeping first occurrences.
fn dedup(members: Vec<Index>) -> Vec<Index> {
    let mut seen = HashSet::new();
    members
        .into_iter()
        .filter(|member| seen.insert(member.clone()))
        .collect()
}

fn group(component: &str, values: &[Value], dimen: usize) -> Result<Vec<Index>> {
    if values.len() % dimen != 0 {
        return Err(ModelError::Arity {
            component: component.to_owned(),
            expected: dimen,
            found: values.len() % dimen,
        });
    }
    Ok(values.chunks(dimen).map(<[Value]>::to_vec).collect())
}

fn key_values(component: &str, entries: &[Entry]) -> Result<Index> {
    entries
        .iter()
        .map(|entry| match entry {
            Entry::Value(value) => Ok(value.clone()),
            Entry::Missing => Err(ModelError::MissingIndexValue(component.to_owned())),
        })
        .collect()
}

/// Key/value pairs of a single-parameter statement. Missing cells are skipped.
fn param_entries(name: &str, arity: usize, body: &ParamBody) -> Result<Vec<(Index, Value)>> {
    let mut out = Vec::new();
    match body {
        ParamBody::Empty => {}
        ParamBody::List(entries) => {
            let width = arity + 1;
            if entries.len() % width != 0 {
                return Err(ModelError::Arity {
                    component: name.to_owned(),
                    expected: width,
                    found: entries.len() % width,
                });
            }
            for chunk in entries.chunks(width) {
                let key = key_values(name, &chunk[..arity])?;
                if let Entry::Value(value) = &chunk[arity] {
                    out.push((key, value.clone()));
                }
            }
        }
        ParamBody::Table { columns, cells } => {
            if arity != 2 {
                return Err(ModelError::Arity {
                    component: name.to_owned(),
                    expected: arity,
                    found: 2,
                });
            }
            let width = columns.len() + 1;
            if cells.len() % width != 0 {
                return Err(ModelError::Arity {
                    component: name.to_owned(),
                    expected: width,
                    found: cells.len() % width,
                });
            }
            for row in cells.chunks(width) {
                let row_key = key_values(name, &row[..1])?;
                for (column, cell) in columns.iter().zip(&row[1..]) {
                    if let Entry::Value(value) = cell {
                        let mut key = row_key.clone();
                        key.push(column.clone());
                        out.push((key, value.clone()));
                    }
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSPORT: &str = r#"
name = "transport"
doc = "Transportation problem"

[[sets]]
name = "plants"
doc = "canning plants"

[[sets]]
name = "markets"

[[params]]
name = "capacity"
index = ["plants"]

[[params]]
name = "cost"
index = ["plants", "markets"]
default = 0

[[params]]
name = "freight"
value = 90

[[vars]]
name = "ship"
index = ["plants", "markets"]

[[vars]]
name = "total"
"#;

    const TRANSPORT_DAT: &str = "
set plants := seattle san-diego;
set markets := new-york chicago;
param capacity := seattle 350 san-diego 600;
param cost : new-york chicago :=
    seattle 2.5 1.7
    san-diego . 1.8;
";

    fn transport() -> ModelInstance {
        let def = ModelDefinition::from_toml(TRANSPORT).unwrap();
        def.instantiate_with(&dat::parse(TRANSPORT_DAT).unwrap())
            .unwrap()
    }

    #[test]
    fn test_declaration_order() {
        let model = transport();
        let names: Vec<&str> = model.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["capacity", "cost", "freight"]);
        assert_eq!(model.sets()[0].doc.as_deref(), Some("canning plants"));
    }

    #[test]
    fn test_param_default_fills_domain() {
        let model = transport();
        let cost = model.param("cost").unwrap();
        assert_eq!(cost.entries.len(), 4);
        assert_eq!(
            cost.get(&["san-diego".into(), "new-york".into()]),
            Some(&Value::Int(0))
        );
        assert_eq!(
            cost.get(&["seattle".into(), "chicago".into()]),
            Some(&Value::Real(1.7))
        );
    }

    #[test]
    fn test_inline_scalar_param() {
        let model = transport();
        let freight = model.param("freight").unwrap();
        assert_eq!(freight.entries, vec![(Vec::new(), Value::Int(90))]);
    }

    #[test]
    fn test_var_domain() {
        let model = transport();
        let ship = model.var("ship").unwrap();
        let keys: Vec<String> = ship.entries.iter().map(|e| canonical(&e.index)).collect();
        assert_eq!(
            keys,
            [
                "('seattle', 'new-york')",
                "('seattle', 'chicago')",
                "('san-diego', 'new-york')",
                "('san-diego', 'chicago')",
            ]
        );
        assert_eq!(model.var("total").unwrap().entries.len(), 1);
    }

    #[test]
    fn test_sparse_param_without_default() {
        let def = ModelDefinition::from_toml(TRANSPORT).unwrap();
        let commands = dat::parse(
            "set plants := seattle san-diego; set markets := chicago;\n\
             param capacity := san-diego 600;",
        )
        .unwrap();
        let model = def.instantiate_with(&commands).unwrap();
        let capacity = model.param("capacity").unwrap();
        assert_eq!(
            capacity.entries,
            vec![(vec![Value::from("san-diego")], Value::Int(600))]
        );
    }

    #[test]
    fn test_out_of_domain() {
        let def = ModelDefinition::from_toml(TRANSPORT).unwrap();
        let commands =
            dat::parse("set plants := seattle; set markets := chicago; param capacity := boston 1;")
                .unwrap();
        assert!(matches!(
            def.instantiate_with(&commands),
            Err(ModelError::OutOfDomain { component, .. }) if component == "capacity"
        ));
    }

    #[test]
    fn test_unknown_component() {
        let def = ModelDefinition::from_toml(TRANSPORT).unwrap();
        let commands = dat::parse("param demand := 1;").unwrap();
        assert!(matches!(
            def.instantiate_with(&commands),
            Err(ModelError::UnknownComponent { kind: "param", .. })
        ));
    }

    #[test]
    fn test_missing_scalar_value() {
        let def = ModelDefinition::from_toml("name = \"m\"\n[[params]]\nname = \"p\"\n").unwrap();
        assert!(matches!(
            def.instantiate_with(&[]),
            Err(ModelError::MissingValue(name)) if name == "p"
        ));
    }

    #[test]
    fn test_duplicate_component() {
        let def = ModelDefinition::from_toml(
            "name = \"m\"\n[[sets]]\nname = \"x\"\n[[vars]]\nname = \"x\"\n",
        )
        .unwrap();
        assert!(matches!(
            def.instantiate_with(&[]),
            Err(ModelError::DuplicateComponent(_))
        ));
    }

    #[test]
    fn test_tuple_set_members() {
        let def = ModelDefinition::from_toml(
            "name = \"m\"\n[[sets]]\nname = \"arcs\"\ndimen = 2\nmembers = [[1, 2], [2, 3]]\n\
             [[vars]]\nname = \"flow\"\nindex = [\"arcs\"]\n",
        )
        .unwrap();
        let model = def.instantiate_with(&[]).unwrap();
        let flow = model.var("flow").unwrap();
        assert_eq!(flow.entries[1].index, vec![Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_indexed_set_data() {
        let def = ModelDefinition::from_toml(
            "name = \"m\"\n[[sets]]\nname = \"I\"\n[[sets]]\nname = \"S\"\nindex = [\"I\"]\n",
        )
        .unwrap();
        let commands = dat::parse("set I := a b; set S[a] := x y;").unwrap();
        let model = def.instantiate_with(&commands).unwrap();
        let s = model.set("S").unwrap();
        assert!(s.is_indexed());
        assert_eq!(
            s.members,
            SetMembers::Indexed(vec![(
                vec![Value::from("a")],
                vec![vec![Value::from("x")], vec![Value::from("y")]]
            )])
        );
    }

    #[test]
    fn test_multi_param_columns() {
        let def = ModelDefinition::from_toml(
            "name = \"m\"\n[[sets]]\nname = \"I\"\n\
             [[params]]\nname = \"p\"\nindex = [\"I\"]\n\
             [[params]]\nname = \"q\"\nindex = [\"I\"]\n",
        )
        .unwrap();
        let commands = dat::parse("set I := 1 2; param : p q := 1 10 20 2 30 .;").unwrap();
        let model = def.instantiate_with(&commands).unwrap();
        assert_eq!(model.param("p").unwrap().entries.len(), 2);
        assert_eq!(
            model.param("q").unwrap().entries,
            vec![(vec![Value::Int(1)], Value::Int(20))]
        );
    }

    #[test]
    fn test_int_and_string_member_collide() {
        let def = ModelDefinition::from_toml(
            "name = \"m\"\n[[sets]]\nname = \"I\"\nmembers = [1, \"1\"]\n\
             [[vars]]\nname = \"x\"\nindex = [\"I\"]\n",
        )
        .unwrap();
        assert!(matches!(
            def.instantiate_with(&[]),
            Err(ModelError::AmbiguousIndex { component, index }) if component == "I" && index == "1"
        ));
    }

    #[test]
    fn test_colliding_var_labels() {
        let def = ModelDefinition::from_toml(
            "name = \"m\"\n\
             [[sets]]\nname = \"I\"\nmembers = [\"a,b\", \"a\"]\n\
             [[sets]]\nname = \"J\"\nmembers = [\"c\", \"b,c\"]\n\
             [[vars]]\nname = \"x\"\nindex = [\"I\", \"J\"]\n",
        )
        .unwrap();
        assert!(matches!(
            def.instantiate_with(&[]),
            Err(ModelError::AmbiguousIndex { component, .. }) if component == "x"
        ));
    }

    #[test]
    fn test_params_without_names() {
        let def = ModelDefinition::from_toml(TRANSPORT).unwrap();
        let commands = [DataCommand::Params {
            names: Vec::new(),
            rows: Vec::new(),
        }];
        assert!(matches!(
            def.instantiate_with(&commands),
            Err(ModelError::NoParams)
        ));
    }

    #[test]
    fn test_placeholder_as_index() {
        let def = ModelDefinition::from_toml(TRANSPORT).unwrap();
        let commands = [DataCommand::Param {
            name: "capacity".to_owned(),
            default: None,
            body: ParamBody::List(vec![Entry::Missing, Entry::Value(Value::Int(5))]),
        }];
        assert!(matches!(
            def.instantiate_with(&commands),
            Err(ModelError::MissingIndexValue(name)) if name == "capacity"
        ));
    }
}
