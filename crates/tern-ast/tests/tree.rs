use tern_ast::build::{ProgramBuilder, DEFAULT_CLASS};
use tern_ast::decl::{DatatypeDecl, FunctionDecl, FunctionKind};
use tern_ast::expr::{BinaryOp, UnaryOp};
use tern_ast::stmt::StmtKind;
use tern_ast::{DeclKind, Expr, Formal, ResolvedProgram, Stmt, Type, SYSTEM_MODULE};

fn function(result: Type, body: Expr) -> DeclKind {
    DeclKind::Function(FunctionDecl {
        kind: FunctionKind::Function,
        is_ghost: false,
        is_static: false,
        type_params: Vec::new(),
        formals: vec![Formal::new("x", Type::Int)],
        result: Formal::new("", result),
        body: Some(body),
    })
}

#[test]
fn builder_registers_members_and_ctors() {
    let mut b = ProgramBuilder::new("demo");
    let m = b.module(b.root(), "M");
    let dt = b.add(m, "Option", DeclKind::Datatype(DatatypeDecl::default()));
    let none = b.ctor(dt, "None", vec![]);
    let some = b.ctor(dt, "Some", vec![Formal::new("value", Type::Int)]);
    let value = b.destructor(dt, "value", Type::Int);
    let program = b.finish();

    let DeclKind::Module(root) = &program.get(program.root).unwrap().kind else {
        panic!("root is not a module");
    };
    assert_eq!(root.members, vec![m]);

    let DeclKind::Datatype(d) = &program.get(dt).unwrap().kind else {
        panic!("not a datatype");
    };
    assert_eq!(d.ctors, vec![none, some]);
    assert_eq!(d.members, vec![value]);
    assert_eq!(program.get(some).unwrap().parent, Some(dt));
}

#[test]
fn default_class_is_created_once() {
    let mut b = ProgramBuilder::new("demo");
    let root = b.root();
    let first = b.default_class(root);
    let second = b.default_class(root);
    assert_eq!(first, second);
    assert_eq!(b.get(first).name, DEFAULT_CLASS);
}

#[test]
fn locations_advance_per_file() {
    let mut b = ProgramBuilder::new("demo");
    let a = b.loc();
    let lib = b.file("lib/util.src", &[]);
    let c = b.loc();
    assert_eq!(c.file, lib);
    assert_eq!(c.line, 1);
    assert!(a.line >= 1);
    let d = b.loc();
    assert_eq!(d.line, 2);
    assert!(d.offset > c.offset);
}

#[test]
fn system_module_is_not_a_root_member() {
    let mut b = ProgramBuilder::new("demo");
    let pair = b.tuple_type(vec![Type::Int, Type::Bool]);
    let keys = b.system_member("map", "Keys");
    let program = b.finish();

    let Type::UserDefined { decl, args } = &pair else {
        panic!("tuple is not a user-defined type");
    };
    assert_eq!(args.len(), 2);
    let tuple = program.get(*decl).unwrap();
    assert_eq!(tuple.name, "_tuple#2");
    let system = program.get(tuple.parent.unwrap()).unwrap();
    assert_eq!(system.name, SYSTEM_MODULE);
    assert_eq!(program.get(keys).unwrap().name, "Keys");

    let DeclKind::Module(root) = &program.get(program.root).unwrap().kind else {
        panic!("root is not a module");
    };
    assert!(root.members.is_empty());
}

#[test]
fn tuple_declaration_has_ctor_and_destructors() {
    let mut b = ProgramBuilder::new("demo");
    let make = b.tuple_ctor(3);
    let second = b.system_member("_tuple#3", "1");
    assert_eq!(b.get(make).name, "_#Make3");
    assert!(matches!(b.get(second).kind, DeclKind::Destructor(_)));
}

#[test]
fn json_round_trip_preserves_tree() {
    let mut b = ProgramBuilder::new("demo");
    let root = b.root();
    let class = b.default_class(root);
    let body = Expr::binary(
        BinaryOp::Add,
        Expr::ident("x", Type::Int),
        Expr::int(1),
        Type::Int,
    );
    b.add(class, "succ", function(Type::Int, body));
    let program = b.finish();

    let json = serde_json::to_string(&program).unwrap();
    assert!(json.contains(r#""function_kind":"function""#), "{json}");
    let back: ResolvedProgram = serde_json::from_str(&json).unwrap();
    assert_eq!(program, back);
}

#[test]
fn method_json_uses_its_own_kind_key() {
    let json = r#"{
        "kind": "method",
        "method_kind": "lemma",
        "is_ghost": true,
        "outs": [{ "name": "r", "ty": { "kind": "int" } }]
    }"#;
    let kind: DeclKind = serde_json::from_str(json).unwrap();
    let DeclKind::Method(m) = kind else {
        panic!("not a method");
    };
    assert_eq!(m.kind, tern_ast::decl::MethodKind::Lemma);
    assert!(m.is_ghost);
    assert_eq!(m.outs.len(), 1);
}

#[test]
fn optional_fields_default_when_absent() {
    let json = r#"{ "kind": "break" }"#;
    let kind: StmtKind = serde_json::from_str(json).unwrap();
    assert_eq!(
        kind,
        StmtKind::Break {
            label: None,
            count: 1
        }
    );

    let json = r#"{ "kind": "set_display", "elements": [] }"#;
    let kind: tern_ast::ExprKind = serde_json::from_str(json).unwrap();
    assert!(matches!(kind, tern_ast::ExprKind::SetDisplay { finite: true, .. }));
}

#[test]
fn render_expressions_and_types() {
    let mut b = ProgramBuilder::new("demo");
    let pair = b.tuple_type(vec![Type::Int, Type::string()]);
    let program = b.finish();

    let s = Expr::ident("s", Type::seq(Type::Int));
    let len = Expr::unary(UnaryOp::Cardinality, s.clone(), Type::Int);
    let cmp = Expr::binary(BinaryOp::Lt, Expr::int(0), len, Type::Bool);
    insta::assert_snapshot!(program.render_expr(&cmp), @"0 < |s|");

    let slice = Expr::slice(s, Some(Expr::int(1)), None, Type::seq(Type::Int));
    insta::assert_snapshot!(program.render_expr(&slice), @"s[1..]");

    insta::assert_snapshot!(
        program.render_type(&Type::map(Type::Int, pair)),
        @"map<int, _tuple#2<int, seq<char>>>"
    );
}

#[test]
fn render_statement_heads() {
    let program = ProgramBuilder::new("demo").finish();
    let decl = Stmt::var("x", Type::Int, Expr::int(3));
    insta::assert_snapshot!(program.render_stmt(&decl), @"var x := 3;");
    let print = Stmt::print(vec![Expr::string("hi")]);
    insta::assert_snapshot!(program.render_stmt(&print), @r#"print "hi";"#);
}
