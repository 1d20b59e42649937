//! Scenario vocabulary and prompt augmentations.

use std::fmt;

/// A named development-task category.
///
/// The classification call is constrained to this closed vocabulary; anything
/// else falls back to [`Scenario::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    React,
    Python,
    FastApi,
    Django,
    Node,
    Fullstack,
    Debug,
    Optimize,
    Generic,
}

impl Scenario {
    /// All scenarios, in vocabulary order.
    pub const ALL: [Scenario; 9] = [
        Scenario::React,
        Scenario::Python,
        Scenario::FastApi,
        Scenario::Django,
        Scenario::Node,
        Scenario::Fullstack,
        Scenario::Debug,
        Scenario::Optimize,
        Scenario::Generic,
    ];

    /// Parse a classification token. Trims and lowercases first.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "react" => Some(Scenario::React),
            "python" => Some(Scenario::Python),
            "fastapi" => Some(Scenario::FastApi),
            "django" => Some(Scenario::Django),
            "node" => Some(Scenario::Node),
            "fullstack" => Some(Scenario::Fullstack),
            "debug" => Some(Scenario::Debug),
            "optimize" => Some(Scenario::Optimize),
            "generic" => Some(Scenario::Generic),
            _ => None,
        }
    }

    /// The vocabulary token for this scenario.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::React => "react",
            Scenario::Python => "python",
            Scenario::FastApi => "fastapi",
            Scenario::Django => "django",
            Scenario::Node => "node",
            Scenario::Fullstack => "fullstack",
            Scenario::Debug => "debug",
            Scenario::Optimize => "optimize",
            Scenario::Generic => "generic",
        }
    }

    /// Scenario-specific prompt augmentation; `None` for the generic fallback.
    pub fn augmentation(&self) -> Option<&'static str> {
        match self {
            Scenario::React => Some(REACT_PROMPT),
            Scenario::Python => Some(PYTHON_PROMPT),
            Scenario::FastApi => Some(FASTAPI_PROMPT),
            Scenario::Django => Some(DJANGO_PROMPT),
            Scenario::Node => Some(NODE_PROMPT),
            Scenario::Fullstack => Some(FULLSTACK_PROMPT),
            Scenario::Debug => Some(DEBUG_PROMPT),
            Scenario::Optimize => Some(OPTIMIZE_PROMPT),
            Scenario::Generic => None,
        }
    }

    /// Quick illustrative example appended when the query contains the
    /// matching keyword. At most one applies per prompt.
    pub fn quick_example(&self, query: &str) -> Option<(&'static str, &'static str)> {
        let query = query.to_lowercase();
        match self {
            Scenario::React if query.contains("todo") => {
                Some(("Quick Todo Example", REACT_TODO_EXAMPLE))
            }
            Scenario::Python if query.contains("calculator") => {
                Some(("Quick Calculator Example", PYTHON_CALC_EXAMPLE))
            }
            Scenario::FastApi if query.contains("api") => {
                Some(("Quick API Example", FASTAPI_API_EXAMPLE))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const REACT_PROMPT: &str = r#"React App Creation:
- Use Vite: npm create vite@latest app-name -- --template react
- Manual setup: Create package.json, index.html, src/App.js
- Avoid create-react-app (slow)
- Always provide npm install and npm start instructions
- Tell user to open http://localhost:3000
- Use run_project tool to automatically start the React app
- Example: {"step":"ACTION","tool":"run_command","input":"npm create vite@latest my-app -- --template react","content":"Creating React app with Vite"}"#;

const PYTHON_PROMPT: &str = r#"Python Project Creation:
- Use standard library when possible
- Create requirements.txt only when needed
- Use virtual environments: python -m venv venv
- Provide clear run instructions
- Show file creation status
- Use run_project tool to automatically run Python scripts
- Example: {"step":"ACTION","tool":"write_file","input":{"filename":"app.py","content":"print('Hello World')"},"content":"Creating Python script"}"#;

const FASTAPI_PROMPT: &str = r#"FastAPI Backend Creation:
- Install: pip install fastapi uvicorn
- Create main.py with FastAPI app
- Use uvicorn for development server
- Always provide server start instructions
- Tell user about http://localhost:8000 and /docs
- Use run_project tool to automatically start FastAPI server
- Example: {"step":"ACTION","tool":"write_file","input":{"filename":"main.py","content":"from fastapi import FastAPI\napp = FastAPI()\n@app.get('/')\ndef read_root():\n    return {'Hello': 'World'}"},"content":"Creating FastAPI app"}"#;

const DJANGO_PROMPT: &str = r#"Django Backend Creation:
- Install: pip install django
- Create: django-admin startproject project_name
- Use: python manage.py runserver
- Provide migration and server start instructions
- Tell user about http://localhost:8000
- Use run_project tool to automatically start Django server
- Example: {"step":"ACTION","tool":"run_command","input":"django-admin startproject myproject","content":"Creating Django project"}"#;

const NODE_PROMPT: &str = r#"Node.js Project Creation:
- Use: npm init -y for package.json
- Install dependencies only when needed
- Use Express.js for web servers
- Provide npm install and start instructions
- Show server URL in output
- Use run_project tool to automatically start Node.js server
- Example: {"step":"ACTION","tool":"run_command","input":"npm init -y","content":"Initializing Node.js project"}"#;

const FULLSTACK_PROMPT: &str = r#"Full-Stack App Creation:
- Frontend: React/Vue with Vite
- Backend: FastAPI/Django/Express
- Database: SQLite for simple apps
- Use separate directories for frontend/backend
- Provide instructions for both servers
- Show both server URLs
- Use run_project tool to start backend, then frontend
- Example: {"step":"ACTION","tool":"run_command","input":"mkdir frontend backend","content":"Creating full-stack project structure"}"#;

const DEBUG_PROMPT: &str = r#"Debugging Guidelines:
- Read existing files first
- Check error messages carefully
- Use run_command to test fixes
- Provide clear error explanations
- Show file reading status
- Example: {"step":"ACTION","tool":"read_file","input":{"filename":"app.py"},"content":"Reading file to debug issue"}"#;

const OPTIMIZE_PROMPT: &str = r#"Performance Optimization:
- Minimize dependencies
- Use efficient tools (Vite over CRA)
- Avoid unnecessary installations
- Focus on core functionality first
- Show optimization results
- Example: {"step":"ACTION","tool":"write_file","input":{"filename":"package.json","content":"{\"name\":\"app\",\"dependencies\":{\"react\":\"^18.2.0\"}}"},"content":"Creating minimal package.json"}"#;

const REACT_TODO_EXAMPLE: &str = r#"{"step":"ACTION","tool":"write_file","input":{"filename":"src/App.js","content":"import React, { useState } from 'react';\nfunction App() {\n  const [todos, setTodos] = useState([]);\n  const [input, setInput] = useState('');\n  const addTodo = () => {\n    if (input.trim()) {\n      setTodos([...todos, input]);\n      setInput('');\n    }\n  };\n  return (\n    <div>\n      <h1>Todo App</h1>\n      <input value={input} onChange={(e) => setInput(e.target.value)} />\n      <button onClick={addTodo}>Add Todo</button>\n      <ul>{todos.map((todo, i) => <li key={i}>{todo}</li>)}</ul>\n    </div>\n  );\n}\nexport default App;"},"content":"Creating React todo app"}"#;

const PYTHON_CALC_EXAMPLE: &str = r#"{"step":"ACTION","tool":"write_file","input":{"filename":"calculator.py","content":"def add(a, b): return a + b\ndef subtract(a, b): return a - b\ndef multiply(a, b): return a * b\ndef divide(a, b): return a / b if b != 0 else 'Error'\n\nprint('Calculator ready!')"},"content":"Creating Python calculator"}"#;

const FASTAPI_API_EXAMPLE: &str = r#"{"step":"ACTION","tool":"write_file","input":{"filename":"api.py","content":"from fastapi import FastAPI\napp = FastAPI()\n\n@app.get('/')\ndef read_root():\n    return {'message': 'Hello World'}\n\n@app.get('/items/{item_id}')\ndef read_item(item_id: int):\n    return {'item_id': item_id}"},"content":"Creating FastAPI endpoints"}"#;
