//! C# source printer for the neutral code representation.

use crate::ast::{
    Class, CompilationUnit, Expr, Field, Member, Method, Primitive, Property, Stmt, TypeRef,
    Visibility,
};
use std::fmt::{Result, Write};


const INDENT: &str = "    ";

/// C# reserved words that must be prefixed with `@` when used as identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Escape an identifier if it collides with a reserved word.
pub fn escape_identifier(name: &str) -> String {
    if RESERVED_WORDS.contains(&name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}

/// Quote a string as a C# regular string literal.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a type expression.
pub fn render_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Primitive(p) => match p {
            Primitive::Int32 => "int",
            Primitive::Int64 => "long",
            Primitive::Float64 => "double",
            Primitive::Bool => "bool",
            Primitive::String => "string",
            Primitive::Bytes => "byte[]",
            Primitive::Object => "object",
        }
        .to_string(),
        TypeRef::Named(name) => escape_identifier(name),
        TypeRef::Optional(inner) => format!("{}?", render_type(inner)),
        TypeRef::List(inner) => format!("List<{}>", render_type(inner)),
        TypeRef::Async(inner) => match inner.as_ref() {
            TypeRef::Unit => "Task".to_string(),
            other => format!("Task<{}>", render_type(other)),
        },
        TypeRef::Unit => "void".to_string(),
    }
}

fn visibility(v: Visibility) -> &'static str {
    match v {
        Visibility::Public => "public",
        Visibility::Private => "private",
    }
}

pub struct Formatter {
    indent_level: usize,
    buffer: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            buffer: String::new(),
        }
    }

    /// Render a whole file.
    pub fn format(mut self, unit: &CompilationUnit) -> std::result::Result<String, std::fmt::Error> {
        self.visit_unit(unit)?;
        Ok(self.buffer)
    }

    /// Render a single declaration at top level.
    pub fn format_member(mut self, member: &Member) -> std::result::Result<String, std::fmt::Error> {
        self.visit_member(member)?;
        Ok(self.buffer)
    }

    fn indent(&mut self) -> Result {
        for _ in 0..self.indent_level {
            write!(self.buffer, "{}", INDENT)?;
        }
        Ok(())
    }

    fn visit_unit(&mut self, unit: &CompilationUnit) -> Result {
        let mut sections = 0;

        if !unit.header.is_empty() {
            for line in &unit.header {
                writeln!(self.buffer, "// {}", line)?;
            }
            sections += 1;
        }

        if !unit.usings.is_empty() {
            if sections > 0 {
                writeln!(self.buffer)?;
            }
            for using in &unit.usings {
                writeln!(self.buffer, "using {};", using.namespace)?;
            }
            sections += 1;
        }

        if let Some(ref namespace) = unit.namespace {
            if sections > 0 {
                writeln!(self.buffer)?;
            }
            let segments: Vec<String> = namespace.split('.').map(escape_identifier).collect();
            writeln!(self.buffer, "namespace {};", segments.join("."))?;
            sections += 1;
        }

        if !unit.members.is_empty() {
            if sections > 0 {
                writeln!(self.buffer)?;
            }
            self.visit_members(&unit.members)?;
        }

        Ok(())
    }

    fn visit_members(&mut self, members: &[Member]) -> Result {
        for (i, member) in members.iter().enumerate() {
            if i > 0 && !members[i - 1].packs_with(member) {
                writeln!(self.buffer)?;
            }
            self.visit_member(member)?;
        }
        Ok(())
    }

    fn visit_member(&mut self, member: &Member) -> Result {
        match member {
            Member::Field(field) => self.visit_field(field),
            Member::Property(prop) => self.visit_property(prop),
            Member::Method(method) => self.visit_method(method),
            Member::Class(class) => self.visit_class(class),
        }
    }

    fn visit_class(&mut self, class: &Class) -> Result {
        self.indent()?;
        writeln!(
            self.buffer,
            "{} class {}",
            visibility(class.visibility),
            escape_identifier(&class.name)
        )?;
        self.indent()?;
        writeln!(self.buffer, "{{")?;
        self.indent_level += 1;
        self.visit_members(&class.members)?;
        self.indent_level -= 1;
        self.indent()?;
        writeln!(self.buffer, "}}")
    }

    fn visit_field(&mut self, field: &Field) -> Result {
        self.indent()?;
        write!(self.buffer, "{} ", visibility(field.visibility))?;
        if field.is_const {
            write!(self.buffer, "const ")?;
        }
        write!(
            self.buffer,
            "{} {}",
            render_type(&field.ty),
            escape_identifier(&field.name)
        )?;
        if let Some(ref value) = field.value {
            write!(self.buffer, " = ")?;
            self.write_expr(value)?;
        }
        writeln!(self.buffer, ";")
    }

    fn visit_property(&mut self, prop: &Property) -> Result {
        self.indent()?;
        writeln!(
            self.buffer,
            "{} {} {} {{ get; init; }}",
            visibility(prop.visibility),
            render_type(&prop.ty),
            escape_identifier(&prop.name)
        )
    }

    fn visit_method(&mut self, method: &Method) -> Result {
        self.indent()?;
        write!(self.buffer, "{} ", visibility(method.visibility))?;
        if method.is_async {
            write!(self.buffer, "async ")?;
        }
        let params: Vec<String> = method
            .params
            .iter()
            .map(|p| format!("{} {}", render_type(&p.ty), escape_identifier(&p.name)))
            .collect();
        writeln!(
            self.buffer,
            "{} {}({})",
            render_type(&method.return_type),
            escape_identifier(&method.name),
            params.join(", ")
        )?;
        self.visit_block(&method.body)
    }

    fn visit_block(&mut self, stmts: &[Stmt]) -> Result {
        self.indent()?;
        writeln!(self.buffer, "{{")?;
        self.indent_level += 1;
        for stmt in stmts {
            self.visit_stmt(stmt)?;
        }
        self.indent_level -= 1;
        self.indent()?;
        writeln!(self.buffer, "}}")
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result {
        self.indent()?;
        match stmt {
            Stmt::Const { ty, name, value } => {
                write!(
                    self.buffer,
                    "const {} {} = ",
                    render_type(ty),
                    escape_identifier(name)
                )?;
                self.write_expr(value)?;
                writeln!(self.buffer, ";")
            }
            Stmt::Var { name, value } => {
                write!(self.buffer, "var {} = ", escape_identifier(name))?;
                self.write_expr(value)?;
                writeln!(self.buffer, ";")
            }
            Stmt::Using { name, value } => {
                write!(self.buffer, "await using var {} = ", escape_identifier(name))?;
                self.write_expr(value)?;
                writeln!(self.buffer, ";")
            }
            Stmt::Expr(expr) => {
                self.write_expr(expr)?;
                writeln!(self.buffer, ";")
            }
            Stmt::If { cond, then } => {
                write!(self.buffer, "if (")?;
                self.write_expr(cond)?;
                writeln!(self.buffer, ")")?;
                self.visit_block(then)
            }
            Stmt::While { cond, body } => {
                write!(self.buffer, "while (")?;
                self.write_expr(cond)?;
                writeln!(self.buffer, ")")?;
                self.visit_block(body)
            }
            Stmt::Return(None) => writeln!(self.buffer, "return;"),
            Stmt::Return(Some(expr)) => {
                write!(self.buffer, "return ")?;
                self.write_expr(expr)?;
                writeln!(self.buffer, ";")
            }
        }
    }

    fn write_expr(&mut self, expr: &Expr) -> Result {
        match expr {
            Expr::Ident(name) => write!(self.buffer, "{}", escape_identifier(name)),
            Expr::Str(value) => write!(self.buffer, "{}", quote_string(value)),
            Expr::Int(n) => write!(self.buffer, "{}", n),
            Expr::Null => write!(self.buffer, "null"),
            Expr::Member { target, name } => {
                self.write_postfix_target(target)?;
                write!(self.buffer, ".{}", escape_identifier(name))
            }
            Expr::Call {
                callee,
                type_args,
                args,
            } => {
                self.write_postfix_target(callee)?;
                if !type_args.is_empty() {
                    let rendered: Vec<String> = type_args.iter().map(render_type).collect();
                    write!(self.buffer, "<{}>", rendered.join(", "))?;
                }
                self.write_args(args)
            }
            Expr::Await(inner) => {
                write!(self.buffer, "await ")?;
                self.write_operand(inner)
            }
            Expr::New { ty, args, fields } => {
                write!(self.buffer, "new {}", render_type(ty))?;
                if !args.is_empty() || fields.is_empty() {
                    self.write_args(args)?;
                }
                if !fields.is_empty() {
                    write!(self.buffer, " {{ ")?;
                    for (i, (name, value)) in fields.iter().enumerate() {
                        if i > 0 {
                            write!(self.buffer, ", ")?;
                        }
                        write!(self.buffer, "{} = ", escape_identifier(name))?;
                        self.write_expr(value)?;
                    }
                    write!(self.buffer, " }}")?;
                }
                Ok(())
            }
            Expr::Conditional {
                cond,
                then,
                otherwise,
            } => {
                self.write_operand(cond)?;
                write!(self.buffer, " ? ")?;
                self.write_operand(then)?;
                write!(self.buffer, " : ")?;
                self.write_operand(otherwise)
            }
            Expr::Cast { ty, expr } => {
                write!(self.buffer, "({})", render_type(ty))?;
                self.write_operand(expr)
            }
            Expr::Coalesce { value, fallback } => {
                self.write_operand(value)?;
                write!(self.buffer, " ?? ")?;
                self.write_operand(fallback)
            }
        }
    }

    fn write_args(&mut self, args: &[Expr]) -> Result {
        write!(self.buffer, "(")?;
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                write!(self.buffer, ", ")?;
            }
            self.write_expr(arg)?;
        }
        write!(self.buffer, ")")
    }

    /// Operands of unary/binary/ternary operators: parenthesize anything looser.
    fn write_operand(&mut self, expr: &Expr) -> Result {
        if matches!(expr, Expr::Conditional { .. } | Expr::Coalesce { .. }) {
            write!(self.buffer, "(")?;
            self.write_expr(expr)?;
            write!(self.buffer, ")")
        } else {
            self.write_expr(expr)
        }
    }

    /// Targets of `.member` and `(call)`: only primary expressions go bare.
    fn write_postfix_target(&mut self, expr: &Expr) -> Result {
        if matches!(
            expr,
            Expr::Await(_) | Expr::Conditional { .. } | Expr::Coalesce { .. } | Expr::Cast { .. }
        ) {
            write!(self.buffer, "(")?;
            self.write_expr(expr)?;
            write!(self.buffer, ")")
        } else {
            self.write_expr(expr)
        }
    }
}
