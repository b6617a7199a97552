//! Materializes validated statements as rule nodes.

use crate::config::{NestedGroupDeclarations, ParserOptions};
use crate::declarations::{DeclarationBlock, DeclarationContext, DeclarationValidator};
use crate::grammar::{
    FeatureType, Rejection, RuleContext, RuleKind, TopLevelState, classify, parse_prelude,
};
use crate::logging::targets;
use crate::selector::{Selector, SelectorList};
use crate::syntax::{BlockItem, ComponentValue, ContentMode, RawDeclaration, Statement, Statements};

use super::arena::{RuleArena, RuleId};
use super::namespaces::NamespaceTable;
use super::rule::{RuleData, RuleNode};

/// Builds rule nodes from statements into an arena.
///
/// Statements that fail validation are logged and dropped; only the rules
/// that survive are stored.
pub struct TreeBuilder<'a> {
    arena: &'a mut RuleArena,
    namespaces: &'a mut NamespaceTable,
    nested_group_declarations: NestedGroupDeclarations,
    validator: DeclarationValidator,
    allow_imports: bool,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder storing nodes in `arena` and registering namespace
    /// rules in `namespaces`.
    pub fn new(
        arena: &'a mut RuleArena,
        namespaces: &'a mut NamespaceTable,
        options: &ParserOptions,
    ) -> Self {
        Self {
            arena,
            namespaces,
            nested_group_declarations: options.nested_group_declarations,
            validator: DeclarationValidator::new(options.value_grammar.clone()),
            allow_imports: true,
        }
    }

    /// Set whether `@import` rules are kept at the top level.
    pub fn allow_imports(mut self, allow: bool) -> Self {
        self.allow_imports = allow;
        self
    }

    /// Build the top-level rules of a stylesheet, returning their ids in order.
    pub fn build_stylesheet(&mut self, values: &[ComponentValue]) -> Vec<RuleId> {
        let mut rules = Vec::new();
        let mut state = TopLevelState::default();

        for item in Statements::new(values, ContentMode::Stylesheet) {
            let BlockItem::Rule(statement) = item else {
                continue;
            };
            let kind = match classify(&statement, RuleContext::Stylesheet) {
                Ok(kind) => kind,
                Err(rejection) => {
                    log_rejection(&statement, rejection, RuleContext::Stylesheet);
                    continue;
                }
            };
            if kind == RuleKind::Import && !self.allow_imports {
                tracing::debug!(target: targets::GRAMMAR, "dropping @import in a constructed stylesheet");
                continue;
            }
            let Some(next) = state.advance(kind) else {
                log_rejection(&statement, Rejection::InvalidPosition, RuleContext::Stylesheet);
                continue;
            };
            match self.build(kind, &statement, RuleContext::Stylesheet) {
                Ok(id) => {
                    state = next;
                    rules.push(id);
                }
                Err(rejection) => log_rejection(&statement, rejection, RuleContext::Stylesheet),
            }
        }

        rules
    }

    /// Validate a classified statement in `context` and build its node
    /// and block contents. The node is not linked to any parent.
    ///
    /// A `@namespace` rule is registered in the namespace table.
    pub fn build(
        &mut self,
        kind: RuleKind,
        statement: &Statement,
        context: RuleContext,
    ) -> Result<RuleId, Rejection> {
        if !context.allows(kind) {
            return Err(Rejection::NotAllowed);
        }
        let data = parse_prelude(kind, statement, context, self.namespaces)
            .ok_or(Rejection::InvalidPrelude)?;
        Ok(self.materialize(data, statement, context))
    }

    /// Build the node for an already validated prelude and fill its block.
    /// The node is not linked to any parent.
    pub fn materialize(&mut self, data: RuleData, statement: &Statement, context: RuleContext) -> RuleId {
        let kind = data.kind();
        if let RuleData::Namespace { prefix, uri } = &data {
            self.namespaces.register(prefix.clone(), uri.clone());
        }

        let declarations = kind
            .has_declarations()
            .then(|| DeclarationContext::for_rule(kind))
            .flatten()
            .map(DeclarationBlock::new);
        let id = self.arena.insert(RuleNode::new(data, declarations, context));

        if let Some(block) = &statement.block {
            self.build_block(id, block, kind.block_context(context));
        }
        id
    }

    fn build_block(&mut self, parent: RuleId, values: &[ComponentValue], context: RuleContext) {
        let mut implicit_scope = None;

        for item in Statements::new(values, context.content_mode()) {
            match item {
                BlockItem::Declaration(declaration) => {
                    self.add_declaration(parent, &declaration, context, &mut implicit_scope);
                }
                BlockItem::Rule(statement) => self.add_child(parent, &statement, context),
            }
        }
    }

    fn add_declaration(
        &mut self,
        parent: RuleId,
        declaration: &RawDeclaration,
        context: RuleContext,
        implicit_scope: &mut Option<RuleId>,
    ) {
        match context {
            RuleContext::Scope => {
                let target = *implicit_scope.get_or_insert_with(|| self.implicit_scope_rule(parent));
                self.store_declaration(target, declaration);
            }
            RuleContext::NestedGroup => match self.nested_group_declarations {
                NestedGroupDeclarations::Retain => {
                    if let Some(node) = self.arena.get_mut(parent) {
                        node.declarations
                            .get_or_insert_with(|| DeclarationBlock::new(DeclarationContext::Style));
                    }
                    self.store_declaration(parent, declaration);
                }
                NestedGroupDeclarations::Discard => {
                    let valid = self
                        .validator
                        .validate(
                            DeclarationContext::Style,
                            &declaration.name,
                            &declaration.value,
                            declaration.important,
                        )
                        .is_some();
                    tracing::trace!(
                        target: targets::GRAMMAR,
                        name = %declaration.name,
                        valid,
                        "discarding declaration in a nested group rule"
                    );
                }
            },
            _ => self.store_declaration(parent, declaration),
        }
    }

    fn store_declaration(&mut self, id: RuleId, declaration: &RawDeclaration) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        if let RuleData::FontFeatureValueType { values } = &mut node.data {
            values.apply(declaration);
            return;
        }
        match &mut node.declarations {
            Some(block) => {
                self.validator.apply(block, declaration);
            }
            None => {
                tracing::trace!(
                    target: targets::GRAMMAR,
                    name = %declaration.name,
                    "declarations are not permitted here"
                );
            }
        }
    }

    fn implicit_scope_rule(&mut self, parent: RuleId) -> RuleId {
        let node = RuleNode::new(
            RuleData::Style {
                selectors: SelectorList(vec![Selector::scope()]),
            },
            Some(DeclarationBlock::new(DeclarationContext::Style)),
            RuleContext::Scope,
        );
        let id = self.arena.insert(node);
        self.arena.attach_child(parent, 0, id);
        id
    }

    fn add_child(&mut self, parent: RuleId, statement: &Statement, context: RuleContext) {
        let result = classify(statement, context).and_then(|kind| self.build(kind, statement, context));
        let id = match result {
            Ok(id) => id,
            Err(rejection) => {
                log_rejection(statement, rejection, context);
                return;
            }
        };

        if let Some(existing) = self.same_feature_block(parent, id) {
            self.merge_feature_block(existing, id);
            return;
        }
        let index = canonical_slot(self.arena, parent, id)
            .unwrap_or_else(|| self.arena.children(parent).len());
        self.arena.attach_child(parent, index, id);
    }

    fn same_feature_block(&self, parent: RuleId, id: RuleId) -> Option<RuleId> {
        let feature = feature_of(self.arena, id)?;
        self.arena
            .children(parent)
            .iter()
            .copied()
            .find(|&child| feature_of(self.arena, child) == Some(feature))
    }

    fn merge_feature_block(&mut self, existing: RuleId, id: RuleId) {
        let Some(RuleNode {
            data: RuleData::FontFeatureValueType { values },
            ..
        }) = self.arena.get(id).cloned()
        else {
            return;
        };
        self.arena.remove_subtree(id);
        if let Some(RuleNode {
            data: RuleData::FontFeatureValueType { values: target },
            ..
        }) = self.arena.get_mut(existing)
        {
            target.merge(values);
        }
    }
}

fn feature_of(arena: &RuleArena, id: RuleId) -> Option<FeatureType> {
    match &arena.get(id)?.data {
        RuleData::FontFeatureValueType { values } => Some(values.feature()),
        _ => None,
    }
}

fn canonical_rank(arena: &RuleArena, id: RuleId) -> Option<usize> {
    match &arena.get(id)?.data {
        RuleData::Margin { index } => Some(*index),
        RuleData::FontFeatureValueType { values } => {
            FeatureType::ALL.iter().position(|feature| *feature == values.feature())
        }
        _ => None,
    }
}

/// The position `child` takes in the child list of `parent` when its kind
/// has a canonical order.
///
/// Margin rules and feature value blocks are kept in canonical order,
/// after any rules of the same rank. Other rules return `None`.
pub fn canonical_slot(arena: &RuleArena, parent: RuleId, child: RuleId) -> Option<usize> {
    let rank = canonical_rank(arena, child)?;
    let siblings = arena.children(parent);
    Some(
        siblings
            .iter()
            .position(|&sibling| canonical_rank(arena, sibling).is_some_and(|other| other > rank))
            .unwrap_or(siblings.len()),
    )
}

fn log_rejection(statement: &Statement, rejection: Rejection, context: RuleContext) {
    let name = statement.name.as_deref().unwrap_or("<qualified>");
    match rejection {
        Rejection::Ignored => {
            tracing::trace!(target: targets::GRAMMAR, name, "ignoring statement");
        }
        _ => {
            tracing::debug!(
                target: targets::GRAMMAR,
                name,
                ?rejection,
                ?context,
                "dropping invalid rule"
            );
        }
    }
}
