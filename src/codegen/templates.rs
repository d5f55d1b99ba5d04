//! 生成程序中固定不变的文本块。
//!
//! 每个动画模式的函数体由"游标创建 / 游标表 / 变换指令 / 事件循环 / 绘制指令"拼成，
//! 这里只放其中不依赖指令的部分。缩进和空行需要逐字节保持一致。

pub const HEADERS: &str = "#include \"config.h\"\n#include \"draw.h\"\n#include \"handle.h\"\n#include \"newcursor.h\"\n\n";

// --- snail ---

pub const SNAIL_OPEN: &str = "void animateDrawingsnail(SDL_Renderer* renderer) {\n";
pub const SNAIL_TRANSFORMS: &str = "    // Movement and rotation instructions\n";

pub const SNAIL_LOOP: &str = r#"    int num_cursors = sizeof(cursors) / sizeof(cursors[0]);

    // Base positions for animation
    int base_x[num_cursors];
    int base_y[num_cursors];
    for (int i = 0; i < num_cursors; i++) {
        base_x[i] = cursors[i]->x;
        base_y[i] = cursors[i]->y;
    }

    double angles[num_cursors]; // Angles for each cursor
    for (int i = 0; i < num_cursors; i++) {
        angles[i] = i * (2 * M_PI / num_cursors); // Distribute cursors evenly
    }

    int radius = 50; // Radius for animation
    int running = 1;
    int is_moving = 0; // Indicator for movement
    SDL_Event event;

    while (running) {
        while (SDL_PollEvent(&event)) {
            switch (event.type) {
                case SDL_QUIT:
                    running = 0;
                    break;

                case SDL_MOUSEBUTTONDOWN:
                    if (event.button.button == SDL_BUTTON_LEFT) {
                        handleSelection(event.button.x, event.button.y, cursors, num_cursors);
                        if (selected_cursor) {
                            is_moving = 1; // Activate movement mode
                        } else {
                            is_moving = 0; // No cursor selected
                        }
                    }
                    break;

                case SDL_MOUSEBUTTONUP:
                    if (event.button.button == SDL_BUTTON_LEFT) {
                        is_moving = 0; // Stop movement

                        // Update base positions for the selected cursor
                        if (selected_cursor) {
                            for (int i = 0; i < num_cursors; i++) {
                                if (cursors[i] == selected_cursor) {
                                    base_x[i] = selected_cursor->x;
                                    base_y[i] = selected_cursor->y;
                                    break;
                                }
                            }
                        }
                    }
                    break;

                case SDL_MOUSEMOTION:
                    if (is_moving && selected_cursor) {
                        handleMovement(event.motion.x, event.motion.y);
                    }
                    break;

                case SDL_MOUSEWHEEL:
                    if (selected_cursor) { // Only zoom if a cursor is selected
                        handleZoom(event.wheel.y > 0);
                    }
                    break;

                case SDL_KEYDOWN:
                    if (selected_cursor) { // Ensure actions only apply to a selected cursor
                        if (event.key.keysym.sym == SDLK_r) { // Rotate clockwise
                            applyRotationToCursor(selected_cursor, 15);
                        }
                        if (event.key.keysym.sym == SDLK_e) { // Rotate counterclockwise
                            applyRotationToCursor(selected_cursor, -15);
                        }
                        if (event.key.keysym.sym == SDLK_DELETE) { // Delete the selected shape
                            handleDeletion();
                        }
                    }
                    break;

                default:
                    break;
            }
        }

        SDL_SetRenderDrawColor(renderer, 0, 0, 0, 255);
        SDL_RenderClear(renderer);

        // Animation and display of cursors
        for (int i = 0; i < num_cursors; i++) {
            if (cursors[i]->visible) {
                // Calculate the animated position
                int anim_x = base_x[i] + radius * cos(angles[i]);
                int anim_y = base_y[i] + radius * sin(angles[i]);

                // Rotate the shape
                rotateCursor(cursors[i], 10);

                // Update animated position only if not being moved
                if (!is_moving || cursors[i] != selected_cursor) {
                    cursors[i]->x = anim_x;
                    cursors[i]->y = anim_y;
                }
            }
            // Advance the angle for animation
            angles[i] += 0.05;
        }
"#;

pub const SNAIL_CLOSE: &str = "        SDL_RenderPresent(renderer);\n        SDL_Delay(50);\n    }\n}\n\n";

// --- 共用的事件分发（bounce 与 disco） ---

pub const EVENT_SWITCH: &str = r#"        while (SDL_PollEvent(&event)) {
            switch (event.type) {
                case SDL_QUIT:
                    running = 0;
                    break;
                case SDL_MOUSEBUTTONDOWN:
                    if (event.button.button == SDL_BUTTON_LEFT) {
                        handleSelection(event.button.x, event.button.y, cursors, num_cursors);
                    }
                    break;
                case SDL_MOUSEMOTION:
                    if (event.motion.state & SDL_BUTTON_LMASK) {
                        handleMovement(event.motion.x, event.motion.y);
                    }
                    break;
                case SDL_MOUSEWHEEL:
                    handleZoom(event.wheel.y > 0);
                    break;
                case SDL_KEYDOWN:
                    if (event.key.keysym.sym == SDLK_r) {
                        applyRotationToCursor(selected_cursor, 15);
                    }
                    if (event.key.keysym.sym == SDLK_e) {
                        applyRotationToCursor(selected_cursor, -15);
                    }
                    if (event.key.keysym.sym == SDLK_DELETE) {
                        handleDeletion();
                    }
                    break;
                default:
                    break;
            }
        }

"#;

// --- bounce ---

pub const BOUNCE_OPEN: &str = "void animateDrawingbond(SDL_Renderer* renderer) {\n";
pub const BOUNCE_TRANSFORMS: &str = "    // Movement instructions and rotation instructions\n";

pub const BOUNCE_SETUP: &str = r#"    int num_cursors = sizeof(cursors) / sizeof(cursors[0]);

    // Initialize individual speeds for each cursor
    int dx[num_cursors];
    int dy[num_cursors];
    for (int i = 0; i < num_cursors; i++) {
        dx[i] = (i % 2 == 0) ? 5 : -5;  // Alternating initial direction
        dy[i] = (i % 2 == 0) ? 5 : -5;
    }

    int running = 1;
    SDL_Event event;

    while (running) {
"#;

pub const BOUNCE_RENDER: &str = r#"        SDL_SetRenderDrawColor(renderer, 0, 0, 0, 255);
        SDL_RenderClear(renderer);

        for (int i = 0; i < num_cursors; i++) {
            if (cursors[i]->visible) {
                if (cursors[i]->x <= 0 || cursors[i]->x >= SCREEN_WIDTH) dx[i] = -dx[i];
                if (cursors[i]->y <= 0 || cursors[i]->y >= SCREEN_HEIGHT) dy[i] = -dy[i];

                cursors[i]->x += dx[i];
                cursors[i]->y += dy[i];

                rotateCursor(cursors[i], 10);
           }
       }
        // Drawing instructions
"#;

pub const BOUNCE_CLOSE: &str = "        SDL_RenderPresent(renderer);\n        SDL_Delay(100);\n        }\n    }\n\n\n";

// --- disco ---

pub const DISCO_OPEN: &str = "void animateRotation2(SDL_Renderer* renderer) {\n    // Defining cursors with different drawing types\n";
pub const DISCO_TRANSFORMS: &str = "    // movement and rotation instructions\n";

pub const DISCO_SETUP: &str = "    int num_cursors = sizeof(cursors) / sizeof(cursors[0]);\n\n    int running = 1;\n    SDL_Event event;\n\n    while (running) {\n";

pub const DISCO_RENDER: &str = r#"        // Clear the screen
        SDL_SetRenderDrawColor(renderer, 0, 0, 0, 255);
        SDL_RenderClear(renderer);

        // Draw the shapes in rotation
        for (int i = 0; i < num_cursors; i++) {
            if (cursors[i]->visible) {
                rotateCursor2(cursors[i], 10); // Specific rotation for animateRotation2

            }
        }
"#;

// 注释末尾带一个空格
pub const DISCO_DRAWINGS: &str = "        // Drawing instructions \n";

pub const DISCO_CLOSE: &str = "        SDL_RenderPresent(renderer);\n        SDL_Delay(100);\n    }\n}\n\n";

// --- 默认模式 ---

pub const DEFAULT_OPEN: &str = "void animateDrawing(SDL_Renderer* renderer) {\n";
pub const DEFAULT_TRANSFORMS: &str = "    // movement and rotation instructions \n";

pub const DEFAULT_LOOP: &str = r#"    int num_cursors = sizeof(cursors) / sizeof(cursors[0]);

    int running = 1;
    while (running) {
        SDL_Event event;
        while (SDL_PollEvent(&event)) {
            switch (event.type) {
                case SDL_QUIT:
                    running = 0;
                    break;
                case SDL_MOUSEBUTTONDOWN:
                    if (event.button.button == SDL_BUTTON_LEFT) {
                        handleSelection(event.button.x, event.button.y, cursors, num_cursors);
                    }
                    break;
                case SDL_MOUSEMOTION:
                    if (event.motion.state & SDL_BUTTON_LMASK) {
                        handleMovement(event.motion.x, event.motion.y);
                    }
                    break;
                case SDL_MOUSEWHEEL:
                    handleZoom(event.wheel.y > 0);
                    break;
                case SDL_KEYDOWN:
                    if (event.key.keysym.sym == SDLK_r) { // Rotate clockwise when 'R' is pressed.
                        applyRotationToCursor(selected_cursor, 15);
                    }
                    if (event.key.keysym.sym == SDLK_e) { // Rotate counterclockwise when 'E' is pressed.
                        applyRotationToCursor(selected_cursor, -15);
                    }
                    if (event.key.keysym.sym == SDLK_DELETE) { // Delete the selected shape.
                        handleDeletion();
                    }
                    break;
                default:
                    break;
            }
        }

        // Clear the screen
        SDL_SetRenderDrawColor(renderer, 0, 0, 0, 255);
        SDL_RenderClear(renderer);

        // Drawing instructions
"#;

pub const DEFAULT_CLOSE: &str = "        SDL_RenderPresent(renderer);\n    }\n}\n\n";

// --- main ---

pub const MAIN_OPEN: &str = r#"int main() {

    // Initialize SDL
    if (SDL_Init(SDL_INIT_VIDEO) != 0) {
        printf("SDL initialization error : %s\n", SDL_GetError());
        return 1;
    }

    SDL_Window* window = SDL_CreateWindow("SDL Cursor Drawing", SDL_WINDOWPOS_CENTERED, SDL_WINDOWPOS_CENTERED, SCREEN_WIDTH, SCREEN_HEIGHT, SDL_WINDOW_SHOWN);
    if (!window) {
        printf("window creation error : %s\n", SDL_GetError());
        SDL_Quit();
        return 1;
    }

    SDL_Renderer* renderer = SDL_CreateRenderer(window, -1, SDL_RENDERER_ACCELERATED);
    if (!renderer) {
        SDL_DestroyWindow(window);
        printf("Renderer creation error : %s\n", SDL_GetError());
        SDL_Quit();
        return 1;
    }

    // Animation mode
"#;

/// 没有选择动画模式时的调用。没有换行，紧接着就是清理代码。
pub const DEFAULT_ENTRY: &str = "      animateDrawing(renderer);";

pub const MAIN_CLOSE: &str = "    // Clean up and exit\n    SDL_DestroyRenderer(renderer);\n    SDL_DestroyWindow(window);\n    SDL_Quit();\n\n    return 0;\n}\n";
