//! Row and argument-bundle classes.

use super::shapes::{column_type, param_type};
use crate::ast::{Class, Member, Property, Visibility};
use crate::drivers::DbDriver;
use crate::error::GenResult;
use crate::naming;
use crate::query::{Column, Parameter};

/// One property per result column, in column order.
pub fn row_class<D: DbDriver + ?Sized>(
    driver: &D,
    row_type: &str,
    columns: &[Column],
) -> GenResult<Class> {
    let names = naming::column_field_names(columns);
    let mut members = Vec::with_capacity(columns.len());
    for (column, name) in columns.iter().zip(names) {
        let ty = column_type(driver, column)?;
        members.push(Member::Property(Property::public(name, ty)));
    }
    Ok(public_class(row_type, members))
}

/// One property per parameter, in parameter order.
pub fn args_class<D: DbDriver + ?Sized>(
    driver: &D,
    arg_type: &str,
    params: &[Parameter],
) -> GenResult<Class> {
    let names = naming::param_field_names(params);
    let mut members = Vec::with_capacity(params.len());
    for (param, name) in params.iter().zip(names) {
        let ty = param_type(driver, param)?;
        members.push(Member::Property(Property::public(name, ty)));
    }
    Ok(public_class(arg_type, members))
}

fn public_class(name: &str, members: Vec<Member>) -> Class {
    Class {
        visibility: Visibility::Public,
        name: name.to_string(),
        members,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Primitive, TypeRef};
    use crate::drivers::postgres::Npgsql;
    use crate::error::GenError;

    fn props(class: &Class) -> Vec<(&str, &TypeRef)> {
        class
            .members
            .iter()
            .map(|m| match m {
                Member::Property(p) => (p.name.as_str(), &p.ty),
                other => panic!("unexpected member {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_row_class() {
        let columns = vec![
            Column::new("author_id", "int8", true),
            Column::new("bio", "text", false),
            Column::new("author_id", "int8", false),
        ];
        let class = row_class(&Npgsql, "ListAuthorsRow", &columns).unwrap();
        assert_eq!(class.name, "ListAuthorsRow");
        let long = TypeRef::Primitive(Primitive::Int64);
        assert_eq!(
            props(&class),
            vec![
                ("authorId", &long),
                ("bio", &TypeRef::Primitive(Primitive::String)),
                ("authorId2", &long.clone().optional()),
            ]
        );
    }

    #[test]
    fn test_args_class_untyped_param() {
        let params = vec![
            Parameter::new(1, Some(Column::new("name", "text", true))),
            Parameter::new(2, None),
        ];
        let class = args_class(&Npgsql, "FindArgs", &params).unwrap();
        let object = TypeRef::Primitive(Primitive::Object).optional();
        assert_eq!(
            props(&class),
            vec![
                ("name", &TypeRef::Primitive(Primitive::String)),
                ("arg2", &object),
            ]
        );
    }

    #[test]
    fn test_unsupported_param_type() {
        let params = vec![Parameter::new(1, Some(Column::new("mood", "mood", true)))];
        assert!(matches!(
            args_class(&Npgsql, "A", &params),
            Err(GenError::UnsupportedType(_))
        ));
    }
}
