// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Member metadata of mapped structs.
//!
//! A [`TypeDescriptor`] is built once per struct type from the member list the
//! derive macro generates, then cached by the
//! [`TypeResolver`](crate::resolver::type_resolver::TypeResolver). Members carry
//! type-erased accessors so that the struct serializer can walk them without
//! knowing the member types.

use crate::error::Error;
use crate::event::Event;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::Serializer;
use std::collections::HashMap;
use std::fmt;

type WriteMemberFn<S> = Box<dyn Fn(&S, &mut WriteContext) -> Result<(), Error> + Send + Sync>;
type ReadMemberFn<S> =
    Box<dyn Fn(&mut S, &mut ReadContext, Event) -> Result<(), Error> + Send + Sync>;
type MemberPredicateFn<S> = Box<dyn Fn(&S) -> bool + Send + Sync>;

/// Type-erased accessors of one member of `S`.
pub struct MemberAccess<S> {
    write: WriteMemberFn<S>,
    read: ReadMemberFn<S>,
    is_default: MemberPredicateFn<S>,
    is_null: MemberPredicateFn<S>,
}

impl<S: 'static> MemberAccess<S> {
    #[inline(always)]
    pub fn write(&self, owner: &S, context: &mut WriteContext) -> Result<(), Error> {
        (self.write)(owner, context)
    }

    /// Populates the member in place from the node starting at `head`.
    #[inline(always)]
    pub fn read(&self, owner: &mut S, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        (self.read)(owner, context, head)
    }

    #[inline(always)]
    pub fn is_default(&self, owner: &S) -> bool {
        (self.is_default)(owner)
    }

    #[inline(always)]
    pub fn is_null(&self, owner: &S) -> bool {
        (self.is_null)(owner)
    }
}

/// Description of one mapped member.
pub struct MemberDescriptor<S> {
    name: &'static str,
    alias: Option<&'static str>,
    private: bool,
    order: Option<i32>,
    access: Option<MemberAccess<S>>,
}

impl<S: 'static> MemberDescriptor<S> {
    /// A member whose default is the natural default of its type.
    pub fn field<F: Serializer>(
        name: &'static str,
        get: fn(&S) -> &F,
        get_mut: fn(&mut S) -> &mut F,
    ) -> Self {
        Self::field_with_default(name, get, get_mut, F::yaml_is_default)
    }

    /// A member with an explicit default, tested by `is_default`.
    pub fn field_with_default<F: Serializer>(
        name: &'static str,
        get: fn(&S) -> &F,
        get_mut: fn(&mut S) -> &mut F,
        is_default: fn(&F) -> bool,
    ) -> Self {
        MemberDescriptor {
            name,
            alias: None,
            private: false,
            order: None,
            access: Some(MemberAccess {
                write: Box::new(move |owner, context| get(owner).yaml_write(context)),
                read: Box::new(move |owner, context, head| {
                    get_mut(owner).yaml_read_node_into(context, head)
                }),
                is_default: Box::new(move |owner| is_default(get(owner))),
                is_null: Box::new(move |owner| get(owner).yaml_is_null()),
            }),
        }
    }

    /// A member excluded from mapping.
    pub fn ignored(name: &'static str) -> Self {
        MemberDescriptor {
            name,
            alias: None,
            private: false,
            order: None,
            access: None,
        }
    }

    /// Lifts a member of the embedded base `B` into `S`.
    pub fn project<B: 'static>(
        base: MemberDescriptor<B>,
        get: fn(&S) -> &B,
        get_mut: fn(&mut S) -> &mut B,
    ) -> Self {
        let access = base.access.map(|access| {
            let MemberAccess {
                write,
                read,
                is_default,
                is_null,
            } = access;
            MemberAccess {
                write: Box::new(move |owner, context| write(get(owner), context)),
                read: Box::new(move |owner, context, head| read(get_mut(owner), context, head)),
                is_default: Box::new(move |owner| is_default(get(owner))),
                is_null: Box::new(move |owner| is_null(get(owner))),
            }
        });
        MemberDescriptor {
            name: base.name,
            alias: base.alias,
            private: base.private,
            order: base.order,
            access,
        }
    }

    pub fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }
}

impl<S> MemberDescriptor<S> {
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    pub fn get_alias(&self) -> Option<&'static str> {
        self.alias
    }

    /// Key used in documents: the alias when present, else the logical name.
    #[inline(always)]
    pub fn document_name(&self) -> &'static str {
        self.alias.unwrap_or(self.name)
    }

    #[inline(always)]
    pub fn is_private(&self) -> bool {
        self.private
    }

    #[inline(always)]
    pub fn is_ignored(&self) -> bool {
        self.access.is_none()
    }

    #[inline(always)]
    pub fn get_order(&self) -> Option<i32> {
        self.order
    }

    #[inline(always)]
    pub fn access(&self) -> Option<&MemberAccess<S>> {
        self.access.as_ref()
    }
}

impl<S> fmt::Debug for MemberDescriptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("private", &self.private)
            .field("order", &self.order)
            .field("ignored", &self.access.is_none())
            .finish()
    }
}

/// Ordered, immutable member list of a struct type.
pub struct TypeDescriptor<S> {
    type_name: String,
    members: Vec<MemberDescriptor<S>>,
    has_factory: bool,
    lookup: HashMap<&'static str, usize>,
}

impl<S> TypeDescriptor<S> {
    /// Builds the descriptor. Members keep declaration order except that
    /// members with an explicit order key come first, sorted by it.
    pub fn new(
        type_name: String,
        members: Vec<MemberDescriptor<S>>,
        has_factory: bool,
    ) -> Result<Self, Error> {
        let mut members: Vec<(usize, MemberDescriptor<S>)> =
            members.into_iter().enumerate().collect();
        members.sort_by_key(|(index, member)| match member.order {
            Some(order) => (0, order, *index),
            None => (1, 0, *index),
        });
        let members: Vec<MemberDescriptor<S>> = members.into_iter().map(|(_, m)| m).collect();

        let mut lookup = HashMap::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            if member.is_ignored() {
                continue;
            }
            lookup.entry(member.name).or_insert(index);
        }
        // aliases shadow logical names
        for (index, member) in members.iter().enumerate() {
            if member.is_ignored() {
                continue;
            }
            if let Some(alias) = member.alias {
                let claimed = members
                    .iter()
                    .filter(|other| other.alias == Some(alias))
                    .count();
                if claimed > 1 {
                    return Err(Error::type_resolution(format!(
                        "alias '{alias}' is claimed by {claimed} members of {type_name}"
                    )));
                }
                lookup.insert(alias, index);
            }
        }
        Ok(TypeDescriptor {
            type_name,
            members,
            has_factory,
            lookup,
        })
    }

    #[inline(always)]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline(always)]
    pub fn members(&self) -> &[MemberDescriptor<S>] {
        &self.members
    }

    #[inline(always)]
    pub fn has_factory(&self) -> bool {
        self.has_factory
    }

    /// Finds the member a document key maps to, alias first, then logical name.
    pub fn member(&self, key: &str) -> Option<&MemberDescriptor<S>> {
        self.lookup.get(key).map(|index| &self.members[*index])
    }
}

impl<S> fmt::Debug for TypeDescriptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("members", &self.members)
            .field("has_factory", &self.has_factory)
            .finish()
    }
}
