/*!
Structured records produced from BIRD command-line output.

- [Protocol]: one row of `show protocols` (optionally with its `all` detail block)
- [Route]: one row of `show route` (optionally with its `all` attribute block)
- [Value]: detail and indentation-tree values
- [AttrValue]: route attribute values
*/
mod protocol;
mod route;
mod value;

pub use protocol::*;
pub use route::*;
pub use value::*;
