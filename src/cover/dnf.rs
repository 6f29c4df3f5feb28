//! Disjunctive normal form as the expression/cover interchange type
//!
//! A [`Dnf`] is a sum of products over named variables, each product a map
//! from variable name to polarity. It is the hand-off point between the
//! expression front end and [`Cover`](super::Cover): expressions flatten to
//! DNF, DNF rows become cover cubes, and minimized covers read back out the
//! same way.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Sum-of-products with named, sorted variables
///
/// The empty DNF denotes FALSE; an empty product inside denotes TRUE.
/// Construction removes duplicate and absorbed products (a product covering
/// a superset of another's points wins), so structurally different but
/// trivially redundant inputs collapse early.
///
/// # Examples
///
/// ```
/// use ristretto_logic::{BoolExpr, Dnf};
///
/// let expr = BoolExpr::parse("a * b + a * b").unwrap();
/// let dnf = Dnf::from(&expr);
/// assert_eq!(dnf.len(), 1);
/// assert_eq!(dnf.variables().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dnf {
    products: Vec<BTreeMap<Arc<str>, bool>>,
    variables: Vec<Arc<str>>,
}

impl Dnf {
    /// The empty DNF (FALSE)
    pub fn new() -> Self {
        Dnf {
            products: Vec::new(),
            variables: Vec::new(),
        }
    }

    /// Build from raw products, deduplicating and absorbing
    pub fn from_cubes(products: Vec<BTreeMap<Arc<str>, bool>>) -> Self {
        // A product with fewer literals covers more points; it absorbs any
        // product extending it. Sorting by literal count makes one forward
        // pass sufficient.
        let mut sorted = products;
        sorted.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        let mut kept: Vec<BTreeMap<Arc<str>, bool>> = Vec::with_capacity(sorted.len());
        'outer: for product in sorted {
            for k in &kept {
                if k.iter().all(|(var, pol)| product.get(var) == Some(pol)) {
                    continue 'outer;
                }
            }
            kept.push(product);
        }

        let mut names = BTreeSet::new();
        for product in &kept {
            for var in product.keys() {
                names.insert(Arc::clone(var));
            }
        }
        Dnf {
            products: kept,
            variables: names.into_iter().collect(),
        }
    }

    /// True iff the DNF denotes FALSE
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// The products
    pub fn cubes(&self) -> &[BTreeMap<Arc<str>, bool>] {
        &self.products
    }

    /// Iterate over the products
    pub fn iter(&self) -> impl Iterator<Item = &BTreeMap<Arc<str>, bool>> {
        self.products.iter()
    }

    /// All variables, sorted by name
    pub fn variables(&self) -> &[Arc<str>] {
        &self.variables
    }
}

impl Default for Dnf {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(lits: &[(&str, bool)]) -> BTreeMap<Arc<str>, bool> {
        lits.iter().map(|&(v, p)| (Arc::from(v), p)).collect()
    }

    #[test]
    fn absorbs_more_specific_products() {
        // a absorbs a*b.
        let dnf = Dnf::from_cubes(vec![
            product(&[("a", true), ("b", true)]),
            product(&[("a", true)]),
        ]);
        assert_eq!(dnf.len(), 1);
        assert_eq!(dnf.cubes()[0], product(&[("a", true)]));
    }

    #[test]
    fn keeps_distinct_polarities() {
        let dnf = Dnf::from_cubes(vec![product(&[("a", true)]), product(&[("a", false)])]);
        assert_eq!(dnf.len(), 2);
    }

    #[test]
    fn deduplicates() {
        let dnf = Dnf::from_cubes(vec![
            product(&[("a", true), ("b", false)]),
            product(&[("a", true), ("b", false)]),
        ]);
        assert_eq!(dnf.len(), 1);
    }

    #[test]
    fn collects_variables_sorted() {
        let dnf = Dnf::from_cubes(vec![
            product(&[("z", true)]),
            product(&[("a", false), ("m", true)]),
        ]);
        let names: Vec<&str> = dnf.variables().iter().map(|v| v.as_ref()).collect();
        assert_eq!(names, vec!["a", "m", "z"]);
    }

    #[test]
    fn true_product_absorbs_everything() {
        let dnf = Dnf::from_cubes(vec![product(&[("a", true)]), product(&[])]);
        assert_eq!(dnf.len(), 1);
        assert!(dnf.cubes()[0].is_empty());
    }
}
