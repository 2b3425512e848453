//! # Enum Class Generation
//!
//! Every enumeration becomes a PHP class of self-valued constants extending
//! a shared abstract `BaseEnum`. Each class declares its constants a second
//! time in an explicit `constants()` map, which is what `BaseEnum` caches
//! and queries; nothing is discovered by reflection at runtime.
//!
//! ## Generated Files
//!
//! ```text
//! Enums/BaseEnum.php        (once, when at least one enumeration exists)
//! Enums/{ClassName}.php     (one per enumeration)
//! ```

mod registry;

pub use registry::EnumRegistry;

use schemaforge_ir::{Enumeration, naming};

use crate::context::GenerationContext;
use crate::php;
use crate::writer::CodeWriter;
use crate::{FileKind, GeneratedFile};

/// Class name of the shared base
pub const BASE_ENUM_CLASS: &str = "BaseEnum";

/// Generate the base class and one class per enumeration.
///
/// Returns nothing when the schema has no enumerations or enum generation is
/// disabled.
pub fn generate_enums(ctx: &GenerationContext) -> Vec<GeneratedFile> {
    if !ctx.config.generate_enums || ctx.enumerations().is_empty() {
        return Vec::new();
    }

    let mut files = Vec::with_capacity(ctx.enumerations().len() + 1);
    files.push(generate_base(ctx));
    for enumeration in ctx.enumerations() {
        files.push(generate_enum_class(ctx, enumeration));
    }
    files
}

// ============================================================================
// BaseEnum
// ============================================================================

/// Methods of `BaseEnum`, at class-body indentation
const BASE_ENUM_BODY: &str = r#"/**
 * Constant pairs per concrete class, filled on first access.
 *
 * @var array
 */
protected static $cache = [];

/**
 * Constant name to value map declared by the concrete class.
 *
 * @return array
 */
abstract protected static function constants();

/**
 * Get the constants of the class. Constant name in key, constant value in value.
 *
 * @return array
 */
public static function pairs()
{
    $class = static::class;

    if (!array_key_exists($class, static::$cache)) {
        static::$cache[$class] = static::constants();
    }

    return static::$cache[$class];
}

/**
 * Get the constant names.
 *
 * @return array
 */
public static function keys()
{
    return array_keys(static::pairs());
}

/**
 * Get the constant values.
 *
 * @return array
 */
public static function values()
{
    return array_values(static::pairs());
}

/**
 * Check if the given key exists (case-sensitive).
 *
 * @param string $key
 * @return bool
 */
public static function isValidKey($key)
{
    return array_key_exists($key, static::pairs());
}

/**
 * Check if the given value exists.
 *
 * @param mixed $value
 * @return bool
 */
public static function isValidValue($value)
{
    return in_array($value, static::values(), true);
}

/**
 * Check if the given text is either a key or a value.
 *
 * @param mixed $keyOrValue
 * @return bool
 */
public static function isValid($keyOrValue)
{
    return static::isValidKey($keyOrValue) || static::isValidValue($keyOrValue);
}"#;

/// Generate `Enums/BaseEnum.php`
pub fn generate_base(ctx: &GenerationContext) -> GeneratedFile {
    let mut w = CodeWriter::new();
    write_header(&mut w, ctx);
    w.line(format!("abstract class {}", BASE_ENUM_CLASS));
    w.block("{", "}", |w| {
        w.lines(BASE_ENUM_BODY.lines());
    });

    GeneratedFile::new(ctx.enum_path(BASE_ENUM_CLASS), w.finish(), FileKind::EnumerationBase)
}

// ============================================================================
// Enumeration classes
// ============================================================================

/// Generate `Enums/<ClassName>.php` for one enumeration
pub fn generate_enum_class(ctx: &GenerationContext, enumeration: &Enumeration) -> GeneratedFile {
    let class_name = naming::class_name(&enumeration.name);
    let mut w = CodeWriter::new();

    write_header(&mut w, ctx);
    w.line(format!("class {} extends {}", class_name, BASE_ENUM_CLASS));
    w.block("{", "}", |w| {
        for (i, literal) in enumeration.literals.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            if let Some(doc) = &literal.documentation {
                php::doc_block(w, doc);
            }
            w.line(format!("const {} = {};", literal.name, php::quote(&literal.name)));
        }

        if !enumeration.literals.is_empty() {
            w.blank();
        }
        php::doc_block(w, "Constant name to value map.\n\n@return array");
        w.line("protected static function constants()");
        w.block("{", "}", |w| {
            let pairs = ctx
                .enum_registry()
                .pairs(&enumeration.name)
                .unwrap_or_default();
            if pairs.is_empty() {
                w.line("return [];");
                return;
            }
            w.block("return [", "];", |w| {
                for (key, value) in pairs {
                    w.line(format!("{} => self::{},", php::quote(key), value));
                }
            });
        });
    });

    tracing::debug!(enumeration = %enumeration.name, class = %class_name, "enum class generated");

    GeneratedFile::new(ctx.enum_path(&class_name), w.finish(), FileKind::Enumeration)
}

fn write_header(w: &mut CodeWriter, ctx: &GenerationContext) {
    w.line("<?php");
    w.blank();
    w.line(format!("namespace {};", ctx.config.enum_namespace));
    w.blank();
}
