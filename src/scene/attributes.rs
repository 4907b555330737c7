use crate::core::color::Rgba;
use serde::{Deserialize, Serialize};

/// Which mesh element a color layer stores one value per.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeDomain {
    /// One value per vertex.
    Point,
    /// One value per face corner (loop).
    Corner,
}

/// A named color layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAttribute {
    pub name: String,
    pub domain: AttributeDomain,
    pub data: Vec<Rgba>,
}

impl ColorAttribute {
    /// Creates a layer of `len` opaque black values.
    pub fn new(name: impl Into<String>, domain: AttributeDomain, len: usize) -> Self {
        Self {
            name: name.into(),
            domain,
            data: vec![Rgba::new(0.0, 0.0, 0.0, 1.0); len],
        }
    }
}

/// The set of color layers on a mesh, with at most one active layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorAttributes {
    layers: Vec<ColorAttribute>,
    active: Option<String>,
}

impl ColorAttributes {
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorAttribute> {
        self.layers.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ColorAttribute> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the named layer, creating it if missing.
    ///
    /// An existing layer with a different domain or length is reset to fit,
    /// so the caller can always index `0..len`.
    pub fn get_or_insert(
        &mut self,
        name: &str,
        domain: AttributeDomain,
        len: usize,
    ) -> &mut ColorAttribute {
        match self.layers.iter().position(|l| l.name == name) {
            Some(idx) => {
                let layer = &mut self.layers[idx];
                if layer.domain != domain || layer.data.len() != len {
                    *layer = ColorAttribute::new(name, domain, len);
                }
                layer
            }
            None => {
                self.layers.push(ColorAttribute::new(name, domain, len));
                let last = self.layers.len() - 1;
                &mut self.layers[last]
            }
        }
    }

    /// Marks the named layer as active. Returns false if it does not exist.
    pub fn set_active(&mut self, name: &str) -> bool {
        if self.contains(name) {
            self.active = Some(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn active(&self) -> Option<&ColorAttribute> {
        self.active.as_deref().and_then(|name| self.get(name))
    }

    /// Removes the named layer, clearing the active marker if it pointed there.
    pub fn remove(&mut self, name: &str) -> Option<ColorAttribute> {
        let idx = self.layers.iter().position(|l| l.name == name)?;
        if self.active.as_deref() == Some(name) {
            self.active = None;
        }
        Some(self.layers.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert_creates_once() {
        let mut attrs = ColorAttributes::default();
        attrs.get_or_insert("NOCS", AttributeDomain::Corner, 6).data[2] =
            Rgba::new(1.0, 0.0, 0.0, 1.0);
        let layer = attrs.get_or_insert("NOCS", AttributeDomain::Corner, 6);
        assert_eq!(layer.data[2], Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_get_or_insert_resets_mismatched_layer() {
        let mut attrs = ColorAttributes::default();
        attrs.get_or_insert("Col", AttributeDomain::Point, 4);
        let layer = attrs.get_or_insert("Col", AttributeDomain::Corner, 12);
        assert_eq!(layer.domain, AttributeDomain::Corner);
        assert_eq!(layer.data.len(), 12);
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_active_layer() {
        let mut attrs = ColorAttributes::default();
        assert!(!attrs.set_active("NOCS"));
        assert!(attrs.active().is_none());

        attrs.get_or_insert("Col", AttributeDomain::Corner, 3);
        attrs.get_or_insert("NOCS", AttributeDomain::Corner, 3);
        assert!(attrs.set_active("NOCS"));
        assert_eq!(attrs.active().map(|l| l.name.as_str()), Some("NOCS"));

        attrs.remove("NOCS");
        assert!(attrs.active().is_none());
        assert_eq!(attrs.len(), 1);
    }
}
