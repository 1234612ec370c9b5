//! Presence and absence of optional property children.
//!
//! Every mutator here is idempotent and leaves no empty property host behind:
//! when a host loses its last child it is removed from its parent, and the
//! removal cascades through ancestors that are property hosts themselves.

use crate::error::Error;
use crate::schema::{self, Kind};
use crate::tree::{Element, NodeId, Tree};
use crate::values::AttrValue;

fn check_accepts(tree: &Tree, host: NodeId, child: &str) -> Result<(), Error> {
    let Some(host_name) = tree.name(host) else {
        return Err(Error::Schema(format!("cannot attach {child} to a non-element node")));
    };
    if !schema::accepts(host_name, child) {
        return Err(Error::Schema(format!("{host_name} does not accept {child}")));
    }
    Ok(())
}

fn insertion_index(tree: &Tree, host: NodeId, child: &str, insert_at_front: bool) -> usize {
    let host_name = tree.name(host).unwrap_or_default();
    let siblings = tree
        .children(host)
        .iter()
        .map(|c| tree.name(*c).unwrap_or_default());
    schema::insertion_index(host_name, child, siblings).unwrap_or(if insert_at_front {
        0
    } else {
        tree.child_count(host)
    })
}

pub(crate) fn get_or_init_named(
    tree: &mut Tree,
    host: NodeId,
    name: &str,
    insert_at_front: bool,
) -> Result<NodeId, Error> {
    if let Some(existing) = tree.first_child(host, name) {
        return Ok(existing);
    }
    check_accepts(tree, host, name)?;
    let index = insertion_index(tree, host, name, insert_at_front);
    let child = tree.create_element(name);
    tree.insert_child(host, index, child);
    Ok(child)
}

/// First `T` child of `host`, created when missing. A new child goes to its
/// schema position when the host's order is known, otherwise to the front
/// (`insert_at_front`) or the end.
pub fn get_or_init<T: Kind>(
    tree: &mut Tree,
    host: NodeId,
    insert_at_front: bool,
) -> Result<NodeId, Error> {
    get_or_init_named(tree, host, T::NAME, insert_at_front)
}

/// Removes `host` if it is an empty property host, then repeats for its parent.
pub fn prune(tree: &mut Tree, host: NodeId) {
    let mut current = Some(host);
    while let Some(id) = current {
        let Some(name) = tree.name(id) else {
            break;
        };
        if !schema::is_property_host(name) || tree.child_count(id) > 0 {
            break;
        }
        log::debug!("Pruning empty {name}");
        current = tree.parent(id);
        tree.remove(id);
    }
}

/// `None` removes every `T` child of `host`; otherwise sets `val` on the
/// first one, creating it when missing.
pub fn set_val_or_remove<T: Kind, V: AttrValue>(
    tree: &mut Tree,
    host: NodeId,
    value: Option<V>,
) -> Result<(), Error> {
    match value {
        Some(value) => set_field_or_remove::<T, V>(tree, host, "val", Some(value)),
        None => {
            tree.remove_children_named(host, T::NAME);
            prune(tree, host);
            Ok(())
        }
    }
}

/// Like [`set_val_or_remove`] for the named field of `T`. Clearing removes the
/// attribute from every `T` child, and a child left bare is detached.
pub fn set_field_or_remove<T: Kind, V: AttrValue>(
    tree: &mut Tree,
    host: NodeId,
    field: &str,
    value: Option<V>,
) -> Result<(), Error> {
    let attr = T::field(field)
        .ok_or_else(|| Error::Schema(format!("{} has no field '{field}'", T::NAME)))?;
    match value {
        Some(value) => {
            let child = get_or_init::<T>(tree, host, false)?;
            tree.set_attribute(child, attr, value.to_attr());
        }
        None => {
            for child in tree.children_named(host, T::NAME) {
                tree.remove_attribute(child, attr);
                if tree.attributes(child).is_empty() && tree.child_count(child) == 0 {
                    tree.remove(child);
                }
            }
            prune(tree, host);
        }
    }
    Ok(())
}

/// Replaces every `T` child of `host` with `subtree`, or removes them all.
pub fn set_property_class_or_remove<T: Kind>(
    tree: &mut Tree,
    host: NodeId,
    subtree: Option<Element>,
) -> Result<Option<NodeId>, Error> {
    let Some(subtree) = subtree else {
        tree.remove_children_named(host, T::NAME);
        prune(tree, host);
        return Ok(None);
    };
    if subtree.name != T::NAME {
        return Err(Error::Schema(format!(
            "expected a {} subtree, got {}",
            T::NAME,
            subtree.name
        )));
    }
    replace_named(tree, host, subtree).map(Some)
}

/// Moves `subtree` into `host` in place of every child with the same name.
pub(crate) fn replace_named(tree: &mut Tree, host: NodeId, subtree: Element) -> Result<NodeId, Error> {
    check_accepts(tree, host, &subtree.name)?;
    tree.remove_children_named(host, &subtree.name);
    let index = insertion_index(tree, host, &subtree.name, false);
    let child = tree.import(subtree);
    tree.insert_child(host, index, child);
    Ok(child)
}

/// Walks a chain of property hosts below `owner`, creating missing links
/// only when `create` is set.
pub fn host_chain(
    tree: &mut Tree,
    owner: NodeId,
    chain: &[&str],
    create: bool,
) -> Result<Option<NodeId>, Error> {
    let mut current = owner;
    for name in chain {
        current = match tree.first_child(current, name) {
            Some(existing) => existing,
            None if create => get_or_init_named(tree, current, name, true)?,
            None => return Ok(None),
        };
    }
    Ok(Some(current))
}

/// Sets or clears a field of `T` found through `chain` below `owner`.
pub fn set_in<T: Kind, V: AttrValue>(
    tree: &mut Tree,
    owner: NodeId,
    chain: &[&str],
    field: &str,
    value: Option<V>,
) -> Result<(), Error> {
    let Some(host) = host_chain(tree, owner, chain, value.is_some())? else {
        return Ok(());
    };
    if field == "val" && value.is_none() {
        set_val_or_remove::<T, V>(tree, host, None)
    } else {
        set_field_or_remove::<T, V>(tree, host, field, value)
    }
}

pub fn child<T: Kind>(tree: &Tree, host: NodeId) -> Option<NodeId> {
    tree.first_child(host, T::NAME)
}

pub fn field<T: Kind, V: AttrValue>(tree: &Tree, host: NodeId, field: &str) -> Option<V> {
    let attr = T::field(field)?;
    let child = child::<T>(tree, host)?;
    V::from_attr(tree.attribute(child, attr)?)
}

pub fn val<T: Kind, V: AttrValue>(tree: &Tree, host: NodeId) -> Option<V> {
    field::<T, V>(tree, host, "val")
}

/// On/off property: present without `val` means on.
pub fn toggle<T: Kind>(tree: &Tree, host: NodeId) -> Option<bool> {
    let child = child::<T>(tree, host)?;
    Some(
        tree.attribute(child, "w:val")
            .is_none_or(|v| bool::from_attr(v).unwrap_or(true)),
    )
}

/// Reads a field of `T` through `chain` below `owner`, never creating anything.
pub fn get_in<T: Kind, V: AttrValue>(
    tree: &Tree,
    owner: NodeId,
    chain: &[&str],
    field_name: &str,
) -> Option<V> {
    let host = chain
        .iter()
        .try_fold(owner, |current, name| tree.first_child(current, name))?;
    field::<T, V>(tree, host, field_name)
}

pub fn toggle_in<T: Kind>(tree: &Tree, owner: NodeId, chain: &[&str]) -> Option<bool> {
    let host = chain
        .iter()
        .try_fold(owner, |current, name| tree.first_child(current, name))?;
    toggle::<T>(tree, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Bold, Italic, RunFonts, RunProperties, TableLayout, TopBorder, Underline};

    fn run_tree() -> (Tree, NodeId) {
        let tree = Tree::new(Element::new("w:r").child(Element::new("w:t").text("x")));
        let root = tree.root();
        (tree, root)
    }

    #[test]
    fn bold_set_then_clear_leaves_no_trace() {
        let (mut tree, r) = run_tree();
        let before = tree.export(r);
        let rpr = get_or_init::<RunProperties>(&mut tree, r, true).unwrap();
        set_val_or_remove::<Bold, bool>(&mut tree, rpr, Some(true)).unwrap();
        assert_eq!(tree.name(tree.children(r)[0]), Some("w:rPr"));
        assert_eq!(val::<Bold, bool>(&tree, rpr), Some(true));

        set_val_or_remove::<Bold, bool>(&mut tree, rpr, None).unwrap();
        assert!(!tree.contains(rpr));
        assert_eq!(tree.export(r), before);
    }

    #[test]
    fn setters_are_idempotent() {
        let (mut tree, r) = run_tree();
        let rpr = get_or_init::<RunProperties>(&mut tree, r, true).unwrap();
        set_val_or_remove::<Italic, bool>(&mut tree, rpr, Some(true)).unwrap();
        let once = tree.export(r);
        set_val_or_remove::<Italic, bool>(&mut tree, rpr, Some(true)).unwrap();
        assert_eq!(tree.export(r), once);
        assert_eq!(tree.children_named(rpr, "w:i").len(), 1);
    }

    #[test]
    fn children_land_in_schema_order() {
        let (mut tree, r) = run_tree();
        let rpr = get_or_init::<RunProperties>(&mut tree, r, true).unwrap();
        set_val_or_remove::<Italic, bool>(&mut tree, rpr, Some(true)).unwrap();
        set_field_or_remove::<RunFonts, String>(&mut tree, rpr, "ascii", Some("Arial".into()))
            .unwrap();
        set_val_or_remove::<Bold, bool>(&mut tree, rpr, Some(true)).unwrap();
        let names: Vec<_> = tree
            .children(rpr)
            .iter()
            .filter_map(|c| tree.name(*c))
            .collect();
        assert_eq!(names, ["w:rFonts", "w:b", "w:i"]);
    }

    #[test]
    fn clearing_one_field_keeps_the_others() {
        let (mut tree, r) = run_tree();
        let rpr = get_or_init::<RunProperties>(&mut tree, r, true).unwrap();
        set_field_or_remove::<Underline, String>(&mut tree, rpr, "val", Some("single".into()))
            .unwrap();
        set_field_or_remove::<Underline, String>(&mut tree, rpr, "color", Some("FF0000".into()))
            .unwrap();
        set_field_or_remove::<Underline, String>(&mut tree, rpr, "val", None).unwrap();
        let u = child::<Underline>(&tree, rpr).unwrap();
        assert_eq!(tree.attribute(u, "w:val"), None);
        assert_eq!(tree.attribute(u, "w:color"), Some("FF0000"));

        set_field_or_remove::<Underline, String>(&mut tree, rpr, "color", None).unwrap();
        assert!(!tree.contains(rpr));
    }

    #[test]
    fn pruning_cascades_through_hosts() {
        let mut tree = Tree::new(Element::new("w:p"));
        let p = tree.root();
        set_in::<TopBorder, String>(&mut tree, p, &["w:pPr", "w:pBdr"], "val", Some("single".into()))
            .unwrap();
        assert!(tree.find_path(p, &["w:pPr", "w:pBdr", "w:top"]).is_some());
        set_in::<TopBorder, String>(&mut tree, p, &["w:pPr", "w:pBdr"], "val", None).unwrap();
        assert_eq!(tree.child_count(p), 0);
    }

    #[test]
    fn schema_misuse_is_reported() {
        let (mut tree, r) = run_tree();
        let rpr = get_or_init::<RunProperties>(&mut tree, r, true).unwrap();
        assert!(matches!(
            set_field_or_remove::<TableLayout, String>(&mut tree, rpr, "type", Some("fixed".into())),
            Err(Error::Schema(_))
        ));
        assert!(matches!(
            set_field_or_remove::<Bold, bool>(&mut tree, rpr, "size", Some(true)),
            Err(Error::Schema(_))
        ));
        assert!(matches!(
            set_property_class_or_remove::<Bold>(&mut tree, rpr, Some(Element::new("w:i"))),
            Err(Error::Schema(_))
        ));
    }

    #[test]
    fn property_class_replaces_all_instances() {
        let (mut tree, r) = run_tree();
        let rpr = get_or_init::<RunProperties>(&mut tree, r, true).unwrap();
        let u = Element::new("w:u").attr("w:val", "double");
        set_property_class_or_remove::<Underline>(&mut tree, rpr, Some(u.clone())).unwrap();
        set_property_class_or_remove::<Underline>(&mut tree, rpr, Some(u.clone())).unwrap();
        assert_eq!(tree.children_named(rpr, "w:u").len(), 1);
        let id = child::<Underline>(&tree, rpr).unwrap();
        assert_eq!(tree.export(id), Some(u));
        set_property_class_or_remove::<Underline>(&mut tree, rpr, None).unwrap();
        assert!(!tree.contains(rpr));
    }

    #[test]
    fn toggle_without_val_reads_true() {
        let mut tree = Tree::new(Element::new("w:rPr").child(Element::new("w:b")));
        let rpr = tree.root();
        assert_eq!(toggle::<Bold>(&tree, rpr), Some(true));
        set_val_or_remove::<Bold, bool>(&mut tree, rpr, Some(false)).unwrap();
        assert_eq!(toggle::<Bold>(&tree, rpr), Some(false));
        assert_eq!(toggle::<Italic>(&tree, rpr), None);
    }
}
