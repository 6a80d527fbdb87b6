//! Mapping from WebIDL type categories to native declarations and return
//! value conversions.
use crate::webidl::{IdlType, TypeBase};

/// Native representation of a WebIDL value category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeType {
    /// C type spelling; pointer types end in `*`.
    pub c_type: &'static str,
    pub default: &'static str,
    /// Engine macro converting the native value to a `jsval`.
    pub to_jsval: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    Value(NativeType),
    /// Valid only as a return category: no declaration, no conversion.
    Void,
    /// No mapping yet; the payload names the category for diagnostics.
    Unsupported(&'static str),
}

const fn native(c_type: &'static str, default: &'static str, to_jsval: &'static str) -> Mapping {
    Mapping::Value(NativeType { c_type, default, to_jsval })
}

pub fn lookup(base: TypeBase, unsigned: bool) -> Mapping {
    match base {
        // user types are carried as engine objects
        TypeBase::User | TypeBase::Object => native("JSObject *", "NULL", "OBJECT_TO_JSVAL"),
        TypeBase::Bool => native("JSBool", "JS_FALSE", "BOOLEAN_TO_JSVAL"),
        TypeBase::Float | TypeBase::Double => native("double", "0", "DOUBLE_TO_JSVAL"),
        TypeBase::Short if unsigned => native("uint16_t", "0", "INT_TO_JSVAL"),
        TypeBase::Short => native("int16_t", "0", "INT_TO_JSVAL"),
        TypeBase::Long if unsigned => native("uint32_t", "0", "INT_TO_JSVAL"),
        TypeBase::Long => native("int32_t", "0", "INT_TO_JSVAL"),
        TypeBase::String => native("JSString *", "NULL", "JSAPI_STRING_TO_JSVAL"),
        TypeBase::Void => Mapping::Void,
        TypeBase::Byte => Mapping::Unsupported("WEBIDL_TYPE_BYTE"),
        TypeBase::Octet => Mapping::Unsupported("WEBIDL_TYPE_OCTET"),
        TypeBase::LongLong => Mapping::Unsupported("WEBIDL_TYPE_LONGLONG"),
        TypeBase::Sequence => Mapping::Unsupported("WEBIDL_TYPE_SEQUENCE"),
        TypeBase::Date => Mapping::Unsupported("WEBIDL_TYPE_DATE"),
    }
}

/// Mapping for a declared attribute type; a missing or unknown base is
/// unsupported.
pub fn lookup_type(ty: &IdlType<'_>) -> Mapping {
    match ty.base {
        Some(base) => lookup(base, ty.unsigned),
        None => Mapping::Unsupported("unknown type"),
    }
}

impl NativeType {
    /// `\tint32_t jsret = 0;` style local declaration.
    pub fn declaration(&self, ident: &str, user_name: Option<&str>) -> String {
        let sep = if self.c_type.ends_with('*') { "" } else { " " };
        let mut line = format!("\t{}{sep}{ident} = {};", self.c_type, self.default);
        if let Some(user) = user_name {
            line.push_str(&format!(" /* {user} */"));
        }
        line
    }

    pub fn return_conversion(&self, ident: &str) -> String {
        format!("\tJSAPI_PROP_SET_RVAL(cx, vp, {}({ident}));", self.to_jsval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_signedness_selects_width_type() {
        let Mapping::Value(signed) = lookup(TypeBase::Long, false) else { panic!("long unmapped") };
        let Mapping::Value(unsigned) = lookup(TypeBase::Short, true) else { panic!("short unmapped") };
        assert_eq!(signed.declaration("jsret", None), "\tint32_t jsret = 0;");
        assert_eq!(unsigned.declaration("jsret", None), "\tuint16_t jsret = 0;");
        assert_eq!(signed.return_conversion("jsret"), "\tJSAPI_PROP_SET_RVAL(cx, vp, INT_TO_JSVAL(jsret));");
    }

    #[test]
    fn pointer_declarations_hug_the_star() {
        let Mapping::Value(user) = lookup(TypeBase::User, false) else { panic!("user unmapped") };
        assert_eq!(user.declaration("jsret", Some("Node")), "\tJSObject *jsret = NULL; /* Node */");
        let Mapping::Value(string) = lookup(TypeBase::String, false) else { panic!("string unmapped") };
        assert_eq!(string.declaration("jsret", None), "\tJSString *jsret = NULL;");
    }

    #[test]
    fn unmapped_categories_are_unsupported_not_errors() {
        for base in [TypeBase::Byte, TypeBase::Octet, TypeBase::LongLong, TypeBase::Date, TypeBase::Sequence] {
            assert!(matches!(lookup(base, false), Mapping::Unsupported(_)), "{base:?}");
        }
        assert_eq!(lookup(TypeBase::Void, false), Mapping::Void);
        let unknown = IdlType { base: None, unsigned: false, user_name: None };
        assert!(matches!(lookup_type(&unknown), Mapping::Unsupported(_)));
    }
}
