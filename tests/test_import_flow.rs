//! End-to-end import flow
//!
//! Builds small module trees, runs candidate discovery through the
//! public surface, applies the chosen fix, and checks the resulting
//! file text.

use std::path::Path;

use rstest::rstest;

use usefix::base::FileId;
use usefix::hir::{
    AttrMode, CrateId, CrateOrigin, Edition, FileSet, ItemKind, ModuleId, ModuleTree,
    PathResolver, SymbolIndex, Visibility,
};
use usefix::{LineCol, LineIndex};
use usefix::ide::{
    ImportContext, ImportFix, MethodResolution, MethodSource, RefPosition, SourceEdit,
    UnresolvedReference, import_candidates, rewrite_method_call,
};
use usefix::{TextRange, TextSize};

struct Workspace {
    tree: ModuleTree,
    app: CrateId,
    app_root: ModuleId,
}

fn workspace(edition: Edition) -> Workspace {
    let mut tree = ModuleTree::new();
    let app = tree.add_crate("app", CrateOrigin::Workspace, edition);
    let app_root = tree.krate(app).root;
    Workspace { tree, app, app_root }
}

fn apply_first_candidate(
    ws: &Workspace,
    module: ModuleId,
    position: RefPosition,
    reference: &UnresolvedReference,
    text: &str,
) -> Option<String> {
    let index = SymbolIndex::from_tree(&ws.tree);
    let resolver = PathResolver::new(&ws.tree);
    let ctx = ImportContext::new(&ws.tree, module, position);
    let candidates = import_candidates(&ws.tree, &index, &resolver, &ctx, reference);
    let candidate = candidates.into_iter().next()?;

    let mut fix = ImportFix::new(candidate);
    let mut edit = SourceEdit::new(text);
    fix.apply(&ws.tree, &ctx, &mut edit).unwrap();
    Some(edit.commit())
}

#[test]
fn test_cross_crate_import_adds_extern_crate_and_use() {
    let mut ws = workspace(Edition::E2015);
    let dep = ws.tree.add_crate("dep", CrateOrigin::Workspace, Edition::E2015);
    let dep_root = ws.tree.krate(dep).root;
    ws.tree.add_item(dep_root, "Item", ItemKind::Enum, Visibility::Pub, FileId::new(1));

    let out = apply_first_candidate(
        &ws,
        ws.app_root,
        RefPosition::Type,
        &UnresolvedReference::path("Item"),
        "fn main() { let _: Item; }\n",
    )
    .expect("one candidate expected");

    assert_eq!(
        out,
        "extern crate dep;\nuse dep::Item;\n\nfn main() { let _: Item; }\n"
    );
}

#[rstest]
#[case(Edition::E2018, "use crate::util::Widget;\n\nfn main() {}\n")]
#[case(Edition::E2015, "use util::Widget;\n\nfn main() {}\n")]
fn test_local_import_prefix_follows_edition(#[case] edition: Edition, #[case] expected: &str) {
    let mut ws = workspace(edition);
    let util = ws.tree.add_module(ws.app_root, "util", Visibility::Pub);
    ws.tree.add_item(util, "Widget", ItemKind::Enum, Visibility::Pub, FileId::new(0));
    let user = ws.tree.add_module(ws.app_root, "user", Visibility::Private);

    let out = apply_first_candidate(
        &ws,
        user,
        RefPosition::Type,
        &UnresolvedReference::path("Widget"),
        "fn main() {}\n",
    )
    .expect("one candidate expected");

    assert_eq!(out, expected);
}

#[test]
fn test_method_call_fix_imports_trait_and_completes_call() {
    let mut ws = workspace(Edition::E2018);
    let ext = ws.tree.add_module(ws.app_root, "ext", Visibility::Pub);
    let frobnicate =
        ws.tree.add_item(ext, "Frobnicate", ItemKind::Trait, Visibility::Pub, FileId::new(0));
    let user = ws.tree.add_module(ws.app_root, "user", Visibility::Private);

    let index = SymbolIndex::from_tree(&ws.tree);
    let resolver = PathResolver::new(&ws.tree);
    let ctx = ImportContext::new(&ws.tree, user, RefPosition::Value);
    let reference = UnresolvedReference::MethodCall {
        name: "frobnicate".into(),
        variants: vec![MethodResolution::new(MethodSource::TraitImpl(frobnicate))],
    };

    let candidates = import_candidates(&ws.tree, &index, &resolver, &ctx, &reference);
    assert_eq!(candidates.len(), 1);

    // the file holds a partially typed call: `s.frob`
    let text = "fn work(s: S) { s.frob }\n";
    let mut fix = ImportFix::new(candidates.into_iter().next().unwrap());
    let mut edit = SourceEdit::new(text);
    fix.apply(&ws.tree, &ctx, &mut edit).unwrap();
    let partial_start = text.find("frob").unwrap() as u32;
    let caret = rewrite_method_call(
        &mut edit,
        TextRange::new(TextSize::new(partial_start), TextSize::new(partial_start + 4)),
        "frobnicate",
    );
    assert!(u32::from(caret) > partial_start);

    assert_eq!(
        edit.commit(),
        "use crate::ext::Frobnicate;\n\nfn work(s: S) { s.frobnicate() }\n"
    );
}

#[test]
fn test_inherent_method_completes_without_import() {
    // struct S; impl S { fn frobnicate(self) {} }  ...  S.frob<caret>
    let mut ws = workspace(Edition::E2018);
    let s = ws.tree.add_item(
        ws.app_root,
        "S",
        ItemKind::Struct(usefix::hir::FieldStyle::Unit),
        Visibility::Pub,
        FileId::new(0),
    );
    ws.tree.add_contained_item(
        usefix::hir::Container::Impl(s),
        "frobnicate",
        ItemKind::Function,
        Visibility::Pub,
        FileId::new(0),
    );

    let index = SymbolIndex::from_tree(&ws.tree);
    let resolver = PathResolver::new(&ws.tree);
    let ctx = ImportContext::new(&ws.tree, ws.app_root, RefPosition::Value);
    let reference = UnresolvedReference::MethodCall {
        name: "frobnicate".into(),
        variants: vec![MethodResolution::new(MethodSource::Inherent)],
    };
    // inherent methods never need an import
    assert!(import_candidates(&ws.tree, &index, &resolver, &ctx, &reference).is_empty());

    // the call-site rewrite still happens
    let text = "fn main() { S.frob }\n";
    let mut edit = SourceEdit::new(text);
    let start = text.find("frob").unwrap() as u32;
    let caret = rewrite_method_call(
        &mut edit,
        TextRange::new(TextSize::new(start), TextSize::new(start + 4)),
        "frobnicate",
    );
    assert_eq!(u32::from(caret), start + "frobnicate(".len() as u32);
    assert_eq!(edit.commit(), "fn main() { S.frobnicate() }\n");
}

#[test]
fn test_reexported_dep_item_yields_single_root_candidate() {
    // Item is pub in dep::inner and re-exported at dep's root; the
    // importing file has no extern crate declaration yet.
    let mut ws = workspace(Edition::E2015);
    let dep = ws.tree.add_crate("dep", CrateOrigin::Workspace, Edition::E2015);
    let dep_root = ws.tree.krate(dep).root;
    let inner = ws.tree.add_module(dep_root, "inner", Visibility::Pub);
    let item = ws.tree.add_item(inner, "Item", ItemKind::Const, Visibility::Pub, FileId::new(1));
    ws.tree.add_reexport(
        dep_root,
        "Item",
        Visibility::Pub,
        usefix::hir::ReexportTarget::Item(item),
    );

    let index = SymbolIndex::from_tree(&ws.tree);
    let resolver = PathResolver::new(&ws.tree);
    let ctx = ImportContext::new(&ws.tree, ws.app_root, RefPosition::Value);
    let candidates = import_candidates(
        &ws.tree,
        &index,
        &resolver,
        &ctx,
        &UnresolvedReference::path("Item"),
    );
    // the deeper dep::inner::Item path is shadowed by the root re-export
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].info.use_path(), "dep::Item");

    let mut fix = ImportFix::new(candidates.into_iter().next().unwrap());
    let mut edit = SourceEdit::new("fn main() { let _ = Item; }\n");
    fix.apply(&ws.tree, &ctx, &mut edit).unwrap();
    assert_eq!(
        edit.commit(),
        "extern crate dep;\nuse dep::Item;\n\nfn main() { let _ = Item; }\n"
    );
}

#[test]
fn test_resolvable_reference_offers_no_fix() {
    let mut ws = workspace(Edition::E2018);
    ws.tree.add_item(ws.app_root, "Widget", ItemKind::Enum, Visibility::Pub, FileId::new(0));

    let out = apply_first_candidate(
        &ws,
        ws.app_root,
        RefPosition::Type,
        &UnresolvedReference::path("Widget"),
        "fn main() {}\n",
    );
    assert!(out.is_none());
}

#[test]
fn test_no_std_file_gets_core_path_without_extern_decl() {
    let mut ws = workspace(Edition::E2018);
    let std_crate =
        ws.tree.add_crate("std", CrateOrigin::Stdlib(AttrMode::Normal), Edition::E2018);
    let core_crate =
        ws.tree.add_crate("core", CrateOrigin::Stdlib(AttrMode::NoStd), Edition::E2018);
    let std_root = ws.tree.krate(std_crate).root;
    let core_root = ws.tree.krate(core_crate).root;
    let mem_std = ws.tree.add_module(std_root, "mem", Visibility::Pub);
    let mem_core = ws.tree.add_module(core_root, "mem", Visibility::Pub);
    ws.tree.add_item(mem_std, "swap", ItemKind::Function, Visibility::Pub, FileId::new(1));
    ws.tree.add_item(mem_core, "swap", ItemKind::Function, Visibility::Pub, FileId::new(2));
    ws.tree.add_dep(ws.app, std_crate);
    ws.tree.add_dep(ws.app, core_crate);

    let index = SymbolIndex::from_tree(&ws.tree);
    let resolver = PathResolver::new(&ws.tree);
    let ctx = ImportContext::new(&ws.tree, ws.app_root, RefPosition::Value)
        .with_attr_mode(AttrMode::NoStd);
    let candidates = import_candidates(
        &ws.tree,
        &index,
        &resolver,
        &ctx,
        &UnresolvedReference::path("swap"),
    );
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].info.use_path(), "core::mem::swap");

    let mut fix = ImportFix::new(candidates.into_iter().next().unwrap());
    let mut edit = SourceEdit::new("#![no_std]\n\nfn work() {}\n");
    fix.apply(&ws.tree, &ctx, &mut edit).unwrap();
    // core is implicitly available under no_std, so only the use lands
    assert_eq!(
        edit.commit(),
        "#![no_std]\n\nuse core::mem::swap;\n\nfn work() {}\n"
    );
}

#[test]
fn test_fix_is_one_shot() {
    let mut ws = workspace(Edition::E2018);
    let util = ws.tree.add_module(ws.app_root, "util", Visibility::Pub);
    ws.tree.add_item(util, "Widget", ItemKind::Enum, Visibility::Pub, FileId::new(0));
    let user = ws.tree.add_module(ws.app_root, "user", Visibility::Private);

    let index = SymbolIndex::from_tree(&ws.tree);
    let resolver = PathResolver::new(&ws.tree);
    let ctx = ImportContext::new(&ws.tree, user, RefPosition::Type);
    let candidates = import_candidates(
        &ws.tree,
        &index,
        &resolver,
        &ctx,
        &UnresolvedReference::path("Widget"),
    );

    let mut fix = ImportFix::new(candidates.into_iter().next().unwrap());
    let mut edit = SourceEdit::new("fn main() {}\n");
    fix.apply(&ws.tree, &ctx, &mut edit).unwrap();
    assert!(fix.apply(&ws.tree, &ctx, &mut edit).is_err());
}

#[test]
fn test_file_set_round_trip_with_line_positions() {
    let mut ws = workspace(Edition::E2018);
    let util = ws.tree.add_module(ws.app_root, "util", Visibility::Pub);
    let user = ws.tree.add_module(ws.app_root, "user", Visibility::Private);

    let files = FileSet::new();
    let file = files.file_id(Path::new("/app/src/util.rs"));
    ws.tree.add_item(util, "Widget", ItemKind::Enum, Visibility::Pub, file);
    let user_file = files.file_id(Path::new("/app/src/user.rs"));
    files.set_contents(user_file, "fn main() {}\n");

    let text = files.contents(user_file).unwrap();
    let out = apply_first_candidate(
        &ws,
        user,
        RefPosition::Type,
        &UnresolvedReference::path("Widget"),
        &text,
    )
    .expect("one candidate expected");
    files.set_contents(user_file, out.clone());

    // the original item moved down two lines
    let index = LineIndex::new(&out);
    let item_offset = out.find("fn main").unwrap() as u32;
    assert_eq!(index.line_col(item_offset.into()), LineCol::new(2, 0));
    assert_eq!(index.line_start(2), Some(item_offset.into()));
    assert_eq!(files.contents(user_file).as_deref(), Some(out.as_str()));
}

#[test]
fn test_use_lands_after_existing_imports() {
    let mut ws = workspace(Edition::E2018);
    let util = ws.tree.add_module(ws.app_root, "util", Visibility::Pub);
    ws.tree.add_item(util, "Widget", ItemKind::Enum, Visibility::Pub, FileId::new(0));
    let user = ws.tree.add_module(ws.app_root, "user", Visibility::Private);

    let out = apply_first_candidate(
        &ws,
        user,
        RefPosition::Type,
        &UnresolvedReference::path("Widget"),
        "//! module docs\n\nuse std::fmt;\n\nfn show() {}\n",
    )
    .expect("one candidate expected");

    assert_eq!(
        out,
        "//! module docs\n\nuse std::fmt;\nuse crate::util::Widget;\n\nfn show() {}\n"
    );
}
