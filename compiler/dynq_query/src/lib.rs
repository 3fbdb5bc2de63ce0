//! Query-operator composition.
//!
//! Builds canonical query call chains on top of a root queryable source:
//!
//! ```text
//! let people = QuerySource::new("people", Ty::Named(person));
//! let composer = Composer::new(&registry);
//! let query = composer.filter(people, "Age > 18")?;
//! let query = composer.order_by(query, "Name desc, Age")?.take(10);
//! // people.Where(($0) => ($0.Age > 18))
//! //       .OrderByDescending(($0) => $0.Name).ThenBy(($0) => $0.Age).Take(10)
//! ```
//!
//! Every operation is a pure function from trees to trees; nothing is
//! executed. Text arguments are parsed with the source's element type bound
//! as the implicit `it`.

mod composer;
mod source;

pub use composer::Composer;
pub use source::QuerySource;
