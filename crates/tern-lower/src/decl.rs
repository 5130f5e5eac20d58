//! Declaration lowering.
//!
//! A resolved declaration lowers to zero or more IL declarations: imports
//! vanish, a default class dissolves into its members, everything else maps
//! to exactly one node.

use tern_ast::decl::{
    ClassDecl, ConstDecl, DatatypeDecl, FieldDecl, FunctionDecl, FunctionKind, MethodDecl,
    MethodKind,
};
use tern_ast::{Decl, DeclId, DeclKind, Formal};
use tern_il::{Ctor, Decl as IlDecl, DeclKind as IlDeclKind, Output, RoutineKind};
use tracing::debug;

use crate::error::{LowerError, LowerResult};
use crate::lower::Lowerer;

impl<'a> Lowerer<'a> {
    pub(crate) fn lower_decl(&self, id: DeclId) -> LowerResult<Vec<IlDecl>> {
        let decl = self.decl(id)?;
        self.lower_decl_kind(id, decl).map_err(|e| {
            e.within(
                || format!("{} `{}`", decl.kind.describe(), decl.name),
                Some(decl.loc),
            )
        })
    }

    fn lower_decls(&self, ids: &[DeclId]) -> LowerResult<Vec<IlDecl>> {
        let mut out = Vec::with_capacity(ids.len());
        for &id in ids {
            out.extend(self.lower_decl(id)?);
        }
        Ok(out)
    }

    fn lower_decl_kind(&self, id: DeclId, decl: &'a Decl) -> LowerResult<Vec<IlDecl>> {
        let kind = match &decl.kind {
            DeclKind::Import(_) => return Ok(Vec::new()),
            DeclKind::Class(c) if c.is_default => return self.lower_decls(&c.members),
            DeclKind::Module(m) => IlDeclKind::Module {
                decls: self.lower_decls(&m.members)?,
            },
            DeclKind::Export(e) => IlDeclKind::Export {
                provides: e.provides.clone(),
                reveals: e.reveals.clone(),
            },
            DeclKind::Class(c) => self.lower_class(c)?,
            DeclKind::Datatype(d) => self.lower_datatype(d)?,
            DeclKind::Constructor(_) | DeclKind::Destructor(_) => {
                return Err(LowerError::invariant(format!(
                    "{} declared outside a datatype",
                    decl.kind.describe()
                )))
            }
            DeclKind::TypeSynonym(s) => IlDeclKind::TypeDef {
                type_params: self.lower_type_params(&s.type_params)?,
                base: self.lower_type(&s.rhs)?,
                var: None,
                constraint: None,
                is_newtype: false,
            },
            DeclKind::SubsetType(s) => IlDeclKind::TypeDef {
                type_params: self.lower_type_params(&s.type_params)?,
                base: self.lower_type(&s.var.ty)?,
                var: Some(s.var.name.clone()),
                constraint: Some(self.lower_expr(&s.constraint)?),
                is_newtype: false,
            },
            DeclKind::Newtype(n) => {
                let constraint = n
                    .constraint
                    .as_ref()
                    .map(|c| self.lower_expr(c))
                    .transpose()?;
                IlDeclKind::TypeDef {
                    type_params: Vec::new(),
                    base: self.lower_type(&n.var.ty)?,
                    var: constraint.as_ref().map(|_| n.var.name.clone()),
                    constraint,
                    is_newtype: true,
                }
            }
            // The IL has no opaque type node; a datatype nobody can
            // construct is the closest match.
            DeclKind::OpaqueType(o) => IlDeclKind::Datatype {
                type_params: self.lower_type_params(&o.type_params)?,
                ctors: Vec::new(),
                members: Vec::new(),
                is_codatatype: false,
            },
            DeclKind::Iterator(_) => return Err(LowerError::unsupported("iterators")),
            DeclKind::Function(f) => self.lower_function(f)?,
            DeclKind::Method(m) => self.lower_method(m)?,
            DeclKind::Const(c) => self.lower_const(c)?,
            DeclKind::Field(f) => self.lower_field(f)?,
        };

        let path = self.path_of(id)?;
        debug!(path = %path, kind = decl.kind.describe(), "lowered declaration");
        Ok(vec![IlDecl {
            name: decl.name.clone(),
            path,
            pos: self.pos(decl.loc)?,
            kind,
        }])
    }

    fn lower_class(&self, class: &ClassDecl) -> LowerResult<IlDeclKind> {
        Ok(IlDeclKind::Class {
            is_trait: class.is_trait,
            type_params: self.lower_type_params(&class.type_params)?,
            parents: self.lower_types(&class.parent_traits)?,
            members: self.lower_decls(&class.members)?,
        })
    }

    fn lower_datatype(&self, datatype: &DatatypeDecl) -> LowerResult<IlDeclKind> {
        let type_params = self.lower_type_params(&datatype.type_params)?;
        let mut ctors = Vec::with_capacity(datatype.ctors.len());
        for &id in &datatype.ctors {
            ctors.push(self.lower_ctor(id)?);
        }
        // Destructors are already described by the constructor fields.
        let mut members = Vec::new();
        for &id in &datatype.members {
            if !matches!(self.decl(id)?.kind, DeclKind::Destructor(_)) {
                members.extend(self.lower_decl(id)?);
            }
        }
        Ok(IlDeclKind::Datatype {
            type_params,
            ctors,
            members,
            is_codatatype: datatype.is_codatatype,
        })
    }

    fn lower_ctor(&self, id: DeclId) -> LowerResult<Ctor> {
        let decl = self.decl(id)?;
        let DeclKind::Constructor(ctor) = &decl.kind else {
            return Err(LowerError::invariant(format!(
                "datatype constructor list names {} `{}`",
                decl.kind.describe(),
                decl.name
            )));
        };
        let fields = self.lower_formals(&ctor.formals).map_err(|e| {
            e.within(|| format!("datatype constructor `{}`", decl.name), Some(decl.loc))
        })?;
        Ok(Ctor {
            name: decl.name.clone(),
            path: self.path_of(id)?,
            pos: self.pos(decl.loc)?,
            fields,
        })
    }

    fn lower_function(&self, function: &'a FunctionDecl) -> LowerResult<IlDeclKind> {
        let result = &function.result;
        let output = Output::Value {
            name: (!result.name.is_empty()).then(|| result.name.clone()),
            ty: self.lower_type(&result.ty)?,
            ghost: Vec::new(),
        };
        let body = match &function.body {
            Some(body) => Some(
                self.in_routine(std::slice::from_ref(result))
                    .lower_expr(body)?,
            ),
            None => None,
        };
        Ok(IlDeclKind::Routine {
            kind: match function.kind {
                FunctionKind::Function => RoutineKind::Function,
                FunctionKind::Predicate => RoutineKind::Predicate,
            },
            type_params: self.lower_type_params(&function.type_params)?,
            params: self.lower_formals(&function.formals)?,
            output,
            body,
            is_ghost: function.is_ghost,
            is_static: function.is_static,
        })
    }

    fn lower_method(&self, method: &'a MethodDecl) -> LowerResult<IlDeclKind> {
        let computed: Vec<&Formal> = method.outs.iter().filter(|o| !o.is_ghost).collect();
        let ghost_outs: Vec<Formal> = method.outs.iter().filter(|o| o.is_ghost).cloned().collect();
        let ghost = self.lower_formals(&ghost_outs)?;
        let output = match computed.as_slice() {
            [] => Output::Unit { ghost },
            [out] => Output::Value {
                name: Some(out.name.clone()),
                ty: self.lower_type(&out.ty)?,
                ghost,
            },
            _ => {
                return Err(LowerError::unsupported(format!(
                    "{} non-ghost outputs",
                    computed.len()
                )))
            }
        };
        let body = match &method.body {
            Some(stmts) => Some(self.in_routine(&method.outs).lower_block(stmts)?),
            None => None,
        };
        Ok(IlDeclKind::Routine {
            kind: match method.kind {
                MethodKind::Method => RoutineKind::Method,
                MethodKind::Lemma => RoutineKind::Lemma,
                MethodKind::Constructor => RoutineKind::Constructor,
            },
            type_params: self.lower_type_params(&method.type_params)?,
            params: self.lower_formals(&method.ins)?,
            output,
            body,
            is_ghost: method.is_ghost,
            is_static: method.is_static,
        })
    }

    fn lower_const(&self, c: &ConstDecl) -> LowerResult<IlDeclKind> {
        Ok(IlDeclKind::Field {
            ty: self.lower_type(&c.ty)?,
            init: c.rhs.as_ref().map(|e| self.lower_expr(e)).transpose()?,
            is_ghost: c.is_ghost,
            is_mutable: false,
            is_static: c.is_static,
        })
    }

    fn lower_field(&self, field: &FieldDecl) -> LowerResult<IlDeclKind> {
        Ok(IlDeclKind::Field {
            ty: self.lower_type(&field.ty)?,
            init: None,
            is_ghost: field.is_ghost,
            is_mutable: true,
            is_static: false,
        })
    }
}
