//! Bundle up parameters and their values in a generic way.
//!
//! A **ParamSet** stores named, typed parameter lists. Factories like
//! **BVHAccel::create()** look up the values they understand and fall
//! back to defaults for everything missing. Lookups are recorded, so
//! parameters nobody asked for can be reported.

// std
use std::cell::Cell;
// others
use tracing::warn;
// pbrt
use crate::core::pbrt::Float;

// see paramset.h

pub struct ParamSetItem<T> {
    pub name: String,
    pub values: Vec<T>,
    pub n_values: usize,
    pub looked_up: Cell<bool>, // false
}

impl<T> ParamSetItem<T> {
    pub fn new(name: &str, values: Vec<T>) -> Self {
        let n_values: usize = values.len();
        ParamSetItem {
            name: name.to_string(),
            values,
            n_values,
            looked_up: Cell::new(false),
        }
    }
}

#[derive(Default)]
pub struct ParamSet {
    pub bools: Vec<ParamSetItem<bool>>,
    pub ints: Vec<ParamSetItem<i32>>,
    pub floats: Vec<ParamSetItem<Float>>,
    pub strings: Vec<ParamSetItem<String>>,
}

impl ParamSet {
    pub fn add_bool(&mut self, name: &str, value: bool) {
        erase(&mut self.bools, name);
        self.bools.push(ParamSetItem::new(name, vec![value]));
    }
    pub fn add_int(&mut self, name: &str, value: i32) {
        erase(&mut self.ints, name);
        self.ints.push(ParamSetItem::new(name, vec![value]));
    }
    pub fn add_ints(&mut self, name: &str, values: Vec<i32>) {
        erase(&mut self.ints, name);
        self.ints.push(ParamSetItem::new(name, values));
    }
    pub fn add_float(&mut self, name: &str, value: Float) {
        erase(&mut self.floats, name);
        self.floats.push(ParamSetItem::new(name, vec![value]));
    }
    pub fn add_floats(&mut self, name: &str, values: Vec<Float>) {
        erase(&mut self.floats, name);
        self.floats.push(ParamSetItem::new(name, values));
    }
    pub fn add_string(&mut self, name: &str, value: &str) {
        erase(&mut self.strings, name);
        self.strings
            .push(ParamSetItem::new(name, vec![value.to_string()]));
    }
    pub fn find_one_bool(&self, name: &str, d: bool) -> bool {
        lookup_one(&self.bools, name, d)
    }
    pub fn find_one_int(&self, name: &str, d: i32) -> i32 {
        lookup_one(&self.ints, name, d)
    }
    pub fn find_one_float(&self, name: &str, d: Float) -> Float {
        lookup_one(&self.floats, name, d)
    }
    pub fn find_one_string(&self, name: &str, d: String) -> String {
        lookup_one(&self.strings, name, d)
    }
    pub fn find_int(&self, name: &str) -> Vec<i32> {
        lookup_all(&self.ints, name)
    }
    pub fn find_float(&self, name: &str) -> Vec<Float> {
        lookup_all(&self.floats, name)
    }
    /// Names of all parameters which were never looked up.
    pub fn unused(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        collect_unused(&self.bools, &mut names);
        collect_unused(&self.ints, &mut names);
        collect_unused(&self.floats, &mut names);
        collect_unused(&self.strings, &mut names);
        names
    }
    pub fn report_unused(&self) {
        for name in self.unused() {
            warn!("parameter \"{}\" not used", name);
        }
    }
}

fn erase<T>(vec: &mut Vec<ParamSetItem<T>>, name: &str) {
    vec.retain(|item| item.name != name);
}

fn collect_unused<T>(vec: &[ParamSetItem<T>], names: &mut Vec<String>) {
    for v in vec {
        if !v.looked_up.get() {
            names.push(v.name.clone());
        }
    }
}

/// Replaces a macro on the C++ side.
pub fn lookup_one<T>(vec: &[ParamSetItem<T>], name: &str, d: T) -> T
where
    T: Clone,
{
    for v in vec {
        if v.name == name && v.n_values == 1_usize {
            v.looked_up.set(true);
            return v.values[0].clone();
        }
    }
    d
}

pub fn lookup_all<T>(vec: &[ParamSetItem<T>], name: &str) -> Vec<T>
where
    T: Clone,
{
    for v in vec {
        if v.name == name {
            v.looked_up.set(true);
            return v.values.clone();
        }
    }
    Vec::new()
}
