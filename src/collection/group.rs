//! Grouping a [`Collection`] by a primitive field.

use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

use super::Collection;

mod sealed {
    pub trait Sealed {}
}

/// Values a collection can be grouped by.
///
/// Sealed: only strings, characters, booleans and numbers qualify, so that
/// every group has a well-defined string label. Grouping by a compound value
/// is rejected at compile time.
pub trait GroupKey: sealed::Sealed {
    /// The string form under which the group is reported.
    fn group_label(&self) -> String;
}

macro_rules! impl_group_key {
    ($($key:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $key {}

            impl GroupKey for $key {
                #[inline]
                fn group_label(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_group_key!(
    str, String, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<G: sealed::Sealed + ?Sized> sealed::Sealed for &G {}

impl<G: GroupKey + ?Sized> GroupKey for &G {
    #[inline]
    fn group_label(&self) -> String {
        (**self).group_label()
    }
}

impl<T, K, S> Collection<T, K, S>
where
    T: Clone,
    K: Hash + Eq,
    S: BuildHasher + Clone,
{
    /// Partitions the items by the value `field` reads from each of them.
    ///
    /// Groups are keyed by the string form of the value and appear in the
    /// order their first member was inserted. Every group is an independent
    /// collection sharing this collection's identity, with its members in
    /// insertion order.
    ///
    /// `field` returns an owned key. To group by a field borrowed from the
    /// item, such as a `String`, use [`group_by_ref`](Self::group_by_ref)
    /// instead of cloning it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identity_collection::Collection;
    ///
    /// #[derive(Clone)]
    /// struct Ticket {
    ///     id: u32,
    ///     open: bool,
    /// }
    ///
    /// let mut tickets = Collection::with_identity(|ticket: &Ticket| ticket.id);
    /// tickets.add(Ticket { id: 1, open: true });
    /// tickets.add(Ticket { id: 2, open: false });
    /// tickets.add(Ticket { id: 3, open: true });
    ///
    /// let groups = tickets.group_by(|ticket| ticket.open);
    /// let labels: Vec<&String> = groups.keys().collect();
    /// assert_eq!(labels, vec!["true", "false"]);
    /// assert_eq!(groups["true"].len(), 2);
    /// ```
    ///
    /// Compound keys have no string label and do not compile:
    ///
    /// ```rust,compile_fail
    /// use identity_collection::Collection;
    ///
    /// #[derive(Clone)]
    /// struct Shipment {
    ///     id: u32,
    ///     route: Vec<&'static str>,
    /// }
    ///
    /// let shipments = Collection::with_identity(|shipment: &Shipment| shipment.id);
    /// let _groups = shipments.group_by(|shipment| shipment.route.clone());
    /// ```
    ///
    /// ```rust,compile_fail
    /// use identity_collection::Collection;
    ///
    /// let points = Collection::with_identity(|point: &(i32, i32)| *point);
    /// let _groups = points.group_by(|point| *point);
    /// ```
    pub fn group_by<G, F>(&self, mut field: F) -> IndexMap<String, Self>
    where
        F: FnMut(&T) -> G,
        G: GroupKey,
    {
        self.group_by_label(|item| field(item).group_label())
    }

    /// Like [`group_by`](Self::group_by), with a key borrowed from the item.
    ///
    /// ```rust
    /// use identity_collection::Collection;
    ///
    /// #[derive(Clone)]
    /// struct Member {
    ///     id: u32,
    ///     team: String,
    /// }
    ///
    /// let mut members = Collection::with_identity(|member: &Member| member.id);
    /// members.add(Member { id: 1, team: "core".to_string() });
    /// members.add(Member { id: 2, team: "web".to_string() });
    ///
    /// let groups = members.group_by_ref(|member| member.team.as_str());
    /// assert_eq!(groups["core"].len(), 1);
    /// ```
    pub fn group_by_ref<G, F>(&self, mut field: F) -> IndexMap<String, Self>
    where
        F: FnMut(&T) -> &G,
        G: GroupKey + ?Sized,
    {
        self.group_by_label(|item| field(item).group_label())
    }

    fn group_by_label<F>(&self, mut label_of: F) -> IndexMap<String, Self>
    where
        F: FnMut(&T) -> String,
    {
        let mut groups: IndexMap<String, Self> = IndexMap::new();
        for item in self.items.values() {
            groups
                .entry(label_of(item))
                .or_insert_with(|| self.empty_like())
                .add(item.clone());
        }
        groups
    }
}
