/*!
Visiting the elements of a single named top-level array.
*/

use std::ops::ControlFlow;

use crate::{
    scan::Error,
    token::{subtree_size, Document, Kind},
};

use super::Field;

impl<'src, 'tok> Document<'src, 'tok> {
    /**
    Find the top-level key `name` and call `each` for every element of its array value.

    `each` receives the element's index, its kind, and its raw bytes. Nested
    containers are passed as their raw text and their descendants aren't visited.
    Returning [`ControlFlow::Break`] stops the iteration.

    Returns the number of elements visited, including one that stopped the iteration.
    If the key is found but its value is not an array, or the array is empty, then
    no elements are visited. If the key isn't found then [`Error::KeyNotFound`] is
    returned.
    */
    pub fn bind_array(
        &self,
        name: &str,
        mut each: impl FnMut(usize, Kind, &[u8]) -> ControlFlow<()>,
    ) -> Result<usize, Error> {
        let filter = [name];
        let mut field = [Field::default()];
        self.bind(Some(&filter[..]), &mut field);

        let [field] = field;

        if field.key.is_none() {
            diag!("array `{}` not found", name);
            return Err(Error::KeyNotFound);
        }

        let arr = match field.value_token() {
            Some(arr) if arr.kind == Kind::Array => arr,
            value => {
                diag!(
                    "invalid array `{}`: found {:?}",
                    name,
                    value.map(|value| value.kind)
                );
                return Ok(0);
            }
        };

        if arr.size == 0 {
            diag!("array `{}` is empty", name);
            return Ok(0);
        }

        let mut visited = 0;
        let mut cursor = 1;

        for index in 0..arr.size {
            let elem = match field.value.get(cursor..) {
                Some(elem) if !elem.is_empty() => elem,
                _ => break,
            };

            let token = &elem[0];
            visited += 1;

            let flow = each(index, token.kind, token.as_bytes(self.src));

            cursor += subtree_size(elem).max(1);

            if flow.is_break() {
                diag!("array `{}`: stopped at {}", name, index);
                break;
            }
        }

        Ok(visited)
    }
}
